// Classifier - heuristic rule-based speech emotion classification
//
// This module implements an ordered decision table mapping a FeatureSet to one
// of four emotion labels. Rules are evaluated first-match-wins; when no rule
// matches the clip is labelled Neutral / Calm.
//
// 1. pitch_mean > 180 Hz AND energy > 0.02            -> ExcitedAngry
// 2. pitch_mean < 120 Hz AND energy < 0.01            -> Sad
// 3. zero_crossing_rate > 0.1 AND centroid > 2500 Hz  -> FearAnxiety
// 4. otherwise                                        -> NeutralCalm
//
// Thresholds are empirically chosen constants. Comparisons are strict, so a
// value sitting exactly on a threshold never satisfies that condition.
// Features are widened to f64 before comparing against the f64 thresholds;
// an f32 feature such as 0.01f32 (0.0099999998) therefore lies below 0.01.

use crate::analysis::features::FeatureSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule 1: minimum pitch (exclusive) for Excited / Angry
pub const EXCITED_MIN_PITCH_HZ: f64 = 180.0;
/// Rule 1: minimum energy (exclusive) for Excited / Angry
pub const EXCITED_MIN_ENERGY: f64 = 0.02;
/// Rule 2: maximum pitch (exclusive) for Sad
pub const SAD_MAX_PITCH_HZ: f64 = 120.0;
/// Rule 2: maximum energy (exclusive) for Sad
pub const SAD_MAX_ENERGY: f64 = 0.01;
/// Rule 3: minimum zero-crossing rate (exclusive) for Fear / Anxiety
pub const FEAR_MIN_ZCR: f64 = 0.1;
/// Rule 3: minimum spectral centroid (exclusive) for Fear / Anxiety
pub const FEAR_MIN_CENTROID_HZ: f64 = 2500.0;

/// EmotionLabel represents the classified emotional state of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    /// High pitch and high energy
    ExcitedAngry,
    /// Low pitch and low energy
    Sad,
    /// Noisy, bright speech
    FearAnxiety,
    /// Anything else
    NeutralCalm,
}

impl EmotionLabel {
    /// All labels in chart order
    pub const ALL: [EmotionLabel; 4] = [
        EmotionLabel::ExcitedAngry,
        EmotionLabel::Sad,
        EmotionLabel::FearAnxiety,
        EmotionLabel::NeutralCalm,
    ];

    /// Name shown in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionLabel::ExcitedAngry => "Excited / Angry",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::FearAnxiety => "Fear / Anxiety",
            EmotionLabel::NeutralCalm => "Neutral / Calm",
        }
    }

    /// Category name on the emotion spectrum chart
    pub fn chart_name(&self) -> &'static str {
        match self {
            EmotionLabel::ExcitedAngry => "Excited/Angry",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::FearAnxiety => "Fear/Anxiety",
            EmotionLabel::NeutralCalm => "Neutral/Calm",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One entry of the decision table
#[derive(Debug, Clone, Copy)]
pub struct EmotionRule {
    /// Label produced when the rule matches
    pub label: EmotionLabel,
    /// Human-readable condition
    pub condition: &'static str,
    predicate: fn(&FeatureSet) -> bool,
}

impl EmotionRule {
    pub fn matches(&self, features: &FeatureSet) -> bool {
        (self.predicate)(features)
    }
}

fn is_excited(f: &FeatureSet) -> bool {
    f64::from(f.pitch_mean) > EXCITED_MIN_PITCH_HZ && f64::from(f.energy) > EXCITED_MIN_ENERGY
}

fn is_sad(f: &FeatureSet) -> bool {
    f64::from(f.pitch_mean) < SAD_MAX_PITCH_HZ && f64::from(f.energy) < SAD_MAX_ENERGY
}

fn is_fearful(f: &FeatureSet) -> bool {
    f64::from(f.zero_crossing_rate) > FEAR_MIN_ZCR
        && f64::from(f.spectral_centroid) > FEAR_MIN_CENTROID_HZ
}

/// Ordered decision table, evaluated first-match-wins
pub static EMOTION_RULES: [EmotionRule; 3] = [
    EmotionRule {
        label: EmotionLabel::ExcitedAngry,
        condition: "pitch_mean > 180 && energy > 0.02",
        predicate: is_excited,
    },
    EmotionRule {
        label: EmotionLabel::Sad,
        condition: "pitch_mean < 120 && energy < 0.01",
        predicate: is_sad,
    },
    EmotionRule {
        label: EmotionLabel::FearAnxiety,
        condition: "zero_crossing_rate > 0.1 && spectral_centroid > 2500",
        predicate: is_fearful,
    },
];

/// Classifier applies the ordered decision table to a FeatureSet
///
/// Classification is total and pure: every FeatureSet (including zeros and
/// NaN) maps to exactly one label, and identical inputs give identical
/// labels.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: &'static [EmotionRule],
    fallback: EmotionLabel,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            rules: &EMOTION_RULES,
            fallback: EmotionLabel::NeutralCalm,
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[EmotionRule] {
        self.rules
    }

    /// Label used when no rule matches
    pub fn fallback(&self) -> EmotionLabel {
        self.fallback
    }

    /// First matching rule and its position in the table
    pub fn matched_rule(&self, features: &FeatureSet) -> Option<(usize, &EmotionRule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(features))
    }

    /// Classify a feature set
    pub fn classify(&self, features: &FeatureSet) -> EmotionLabel {
        match self.matched_rule(features) {
            Some((index, rule)) => {
                log::debug!(
                    "[Classifier] Rule {} matched ({}) -> {}",
                    index + 1,
                    rule.condition,
                    rule.label
                );
                rule.label
            }
            None => {
                log::debug!("[Classifier] No rule matched -> {}", self.fallback);
                self.fallback
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
