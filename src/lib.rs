// Speech Emotion - acoustic feature extraction and rule-based emotion labels
// Decode a speech clip, extract pitch/energy/ZCR/centroid, classify with a
// fixed decision table and render the emotion spectrum charts.

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod render;
pub mod report;

// Re-exports for convenience
pub use analysis::{
    Classifier, EmotionAnalyzer, EmotionLabel, EmotionSpectrum, FeatureSet, SpeechAnalysis,
};
pub use audio::{AudioClip, AudioDecoder, AudioFormat};
pub use config::{AnalysisConfig, AppConfig, RenderConfig};
pub use render::{render_all, write_artifacts, Renderer, SvgRenderer};
pub use report::{AnalysisReport, PROMPT_MESSAGE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Top-level re-exports wire the full pipeline
        let config = AppConfig::default();
        let analyzer = EmotionAnalyzer::new(&config.analysis).unwrap();
        let renderer = SvgRenderer::new(&config.render).unwrap();

        let analysis = analyzer.analyze_clip(AudioClip::new(vec![0.0; 4096], 22_050));
        let spectrogram = analyzer.spectrogram(&analysis.clip, config.render.top_db);
        let artifacts = render_all(&renderer, &analysis.spectrum, &analysis.clip, &spectrogram);

        assert_eq!(analysis.emotion, EmotionLabel::Sad);
        assert_eq!(artifacts.len(), 3);
    }
}
