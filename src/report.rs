// Report - human-readable and JSON summaries of an analysis run

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::{CategoryScore, EmotionLabel, FeatureSet, SpeechAnalysis};

/// Shown when no input file was provided
pub const PROMPT_MESSAGE: &str = "Upload a speech file to analyze emotions.";

/// Everything the CLI reports about one clip
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub sample_rate: u32,
    pub duration_seconds: f32,
    pub features: FeatureSet,
    pub emotion: EmotionLabel,
    pub emotion_name: &'static str,
    pub spectrum: Vec<CategoryScore>,
    pub artifacts: Vec<PathBuf>,
}

impl AnalysisReport {
    pub fn new(source: impl Into<String>, analysis: &SpeechAnalysis, artifacts: Vec<PathBuf>) -> Self {
        Self {
            source: source.into(),
            sample_rate: analysis.clip.sample_rate(),
            duration_seconds: analysis.clip.duration_seconds(),
            features: analysis.features,
            emotion: analysis.emotion,
            emotion_name: analysis.emotion.display_name(),
            spectrum: analysis.spectrum.entries().to_vec(),
            artifacts,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Source: {} ({:.2}s @ {} Hz)",
            self.source, self.duration_seconds, self.sample_rate
        )?;
        writeln!(f)?;
        writeln!(f, "Extracted Features")?;
        writeln!(f, "Pitch (Hz): {:.2}", self.features.pitch_mean)?;
        writeln!(f, "Energy: {:.4}", self.features.energy)?;
        writeln!(f, "Zero Crossing Rate: {:.4}", self.features.zero_crossing_rate)?;
        writeln!(f, "Spectral Centroid: {:.2}", self.features.spectral_centroid)?;
        writeln!(f)?;
        writeln!(f, "Detected Emotion: {}", self.emotion_name)?;
        writeln!(f)?;
        writeln!(f, "Emotion Spectrum")?;
        for entry in &self.spectrum {
            writeln!(f, "  {:<14} {:.4}", entry.category, entry.score)?;
        }
        if !self.artifacts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Artifacts")?;
            for path in &self.artifacts {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EmotionSpectrum;
    use crate::audio::AudioClip;

    fn analysis(features: FeatureSet, emotion: EmotionLabel) -> SpeechAnalysis {
        SpeechAnalysis {
            clip: AudioClip::new(vec![0.0; 22_050], 22_050),
            features,
            emotion,
            spectrum: EmotionSpectrum::from_features(&features),
        }
    }

    #[test]
    fn test_text_report_lines() {
        let report = AnalysisReport::new(
            "speech.wav",
            &analysis(
                FeatureSet::new(215.3456, 0.031234, 0.08765, 1834.567),
                EmotionLabel::ExcitedAngry,
            ),
            vec![PathBuf::from("out/emotion_spectrum.svg")],
        );
        let text = report.to_string();

        assert!(text.contains("Pitch (Hz): 215.35\n"));
        assert!(text.contains("Energy: 0.0312\n"));
        assert!(text.contains("Zero Crossing Rate: 0.0877\n"));
        assert!(text.contains("Spectral Centroid: 1834.57\n"));
        assert!(text.contains("Detected Emotion: Excited / Angry\n"));
        assert!(text.contains("Excited/Angry"));
        assert!(text.contains("out/emotion_spectrum.svg"));
        assert!(text.starts_with("Source: speech.wav (1.00s @ 22050 Hz)"));
    }

    #[test]
    fn test_text_report_without_artifacts() {
        let report = AnalysisReport::new(
            "quiet.wav",
            &analysis(FeatureSet::default(), EmotionLabel::Sad),
            Vec::new(),
        );
        let text = report.to_string();
        assert!(text.contains("Pitch (Hz): 0.00\n"));
        assert!(text.contains("Detected Emotion: Sad\n"));
        assert!(!text.contains("Artifacts"));
    }

    #[test]
    fn test_json_report() {
        let report = AnalysisReport::new(
            "speech.wav",
            &analysis(FeatureSet::new(150.0, 0.015, 0.15, 3000.0), EmotionLabel::FearAnxiety),
            Vec::new(),
        );
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["emotion"], "FearAnxiety");
        assert_eq!(value["emotion_name"], "Fear / Anxiety");
        assert_eq!(value["features"]["pitch_mean"], 150.0);
        assert_eq!(value["spectrum"].as_array().unwrap().len(), 4);
        assert_eq!(value["spectrum"][1]["category"], "Sad");
        assert_eq!(value["sample_rate"], 22_050);
    }

    #[test]
    fn test_prompt_message() {
        assert_eq!(PROMPT_MESSAGE, "Upload a speech file to analyze emotions.");
    }
}
