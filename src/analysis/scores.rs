// Scores - presentation values for the emotion spectrum chart
//
// The chart shows one score per emotion category at the same time, derived
// directly from the raw features and independent of the classifier's label:
//
//   Excited/Angry = pitch_mean / 300
//   Sad           = 1 - energy * 50
//   Fear/Anxiety  = zero_crossing_rate * 5
//   Neutral/Calm  = spectral_centroid / 4000
//
// Scores are not clamped. They may be negative or exceed the chart ceiling.

use serde::Serialize;

use crate::analysis::classifier::EmotionLabel;
use crate::analysis::features::FeatureSet;

/// Fixed upper bound of the chart's y axis
pub const CHART_CEILING: f32 = 1.2;

/// Per-category display scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionSpectrum {
    pub excited_angry: f32,
    pub sad: f32,
    pub fear_anxiety: f32,
    pub neutral_calm: f32,
}

/// One bar of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    pub label: EmotionLabel,
    pub category: &'static str,
    pub score: f32,
}

impl EmotionSpectrum {
    pub fn from_features(features: &FeatureSet) -> Self {
        Self {
            excited_angry: features.pitch_mean / 300.0,
            sad: 1.0 - features.energy * 50.0,
            fear_anxiety: features.zero_crossing_rate * 5.0,
            neutral_calm: features.spectral_centroid / 4000.0,
        }
    }

    pub fn score(&self, label: EmotionLabel) -> f32 {
        match label {
            EmotionLabel::ExcitedAngry => self.excited_angry,
            EmotionLabel::Sad => self.sad,
            EmotionLabel::FearAnxiety => self.fear_anxiety,
            EmotionLabel::NeutralCalm => self.neutral_calm,
        }
    }

    /// Scores in chart order with their category names
    pub fn entries(&self) -> [CategoryScore; 4] {
        EmotionLabel::ALL.map(|label| CategoryScore {
            label,
            category: label.chart_name(),
            score: self.score(label),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::Classifier;

    #[test]
    fn test_scores_follow_formulas() {
        let spectrum = EmotionSpectrum::from_features(&FeatureSet::new(150.0, 0.01, 0.1, 2000.0));
        assert!((spectrum.excited_angry - 0.5).abs() < 1e-6);
        assert!((spectrum.sad - 0.5).abs() < 1e-6);
        assert!((spectrum.fear_anxiety - 0.5).abs() < 1e-6);
        assert!((spectrum.neutral_calm - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let spectrum = EmotionSpectrum::from_features(&FeatureSet::new(600.0, 0.1, 0.5, 8000.0));
        assert!((spectrum.excited_angry - 2.0).abs() < 1e-6);
        assert!((spectrum.sad + 4.0).abs() < 1e-5);
        assert!(spectrum.fear_anxiety > CHART_CEILING);
        assert!((spectrum.neutral_calm - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_independent_of_label() {
        let features = FeatureSet::new(200.0, 0.05, 0.2, 3000.0);
        assert_eq!(
            Classifier::default().classify(&features),
            EmotionLabel::ExcitedAngry
        );

        let spectrum = EmotionSpectrum::from_features(&features);
        // Sad score still computed as 1 - energy * 50
        assert!((spectrum.sad - (1.0 - 0.05 * 50.0)).abs() < 1e-6);
        assert!((spectrum.fear_anxiety - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_scores() {
        let spectrum = EmotionSpectrum::from_features(&FeatureSet::default());
        let scores: Vec<f32> = spectrum.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_entries_order_and_names() {
        let spectrum = EmotionSpectrum::from_features(&FeatureSet::default());
        let names: Vec<&str> = spectrum.entries().iter().map(|e| e.category).collect();
        assert_eq!(names, vec!["Excited/Angry", "Sad", "Fear/Anxiety", "Neutral/Calm"]);
    }
}
