// Analysis module - speech emotion pipeline
//
// Coordinates one request-scoped run: decode → extract features → classify →
// derive presentation scores. Nothing is shared between runs; every call
// returns a fresh SpeechAnalysis owning its clip.

pub mod classifier;
pub mod features;
pub mod scores;

use std::path::Path;
use std::time::Instant;

use crate::audio::{AudioClip, AudioDecoder, AudioFormat};
use crate::config::AnalysisConfig;
use crate::error::{log_decode_error, ConfigError, DecodeError};

pub use classifier::{Classifier, EmotionLabel, EmotionRule, EMOTION_RULES};
pub use features::{DecibelSpectrogram, FeatureExtractor, FeatureSet, MagnitudeSpectrogram};
pub use scores::{CategoryScore, EmotionSpectrum, CHART_CEILING};

/// Result of analysing one clip
#[derive(Debug, Clone)]
pub struct SpeechAnalysis {
    /// Decoded mono clip at the analysis rate
    pub clip: AudioClip,
    /// Acoustic descriptors
    pub features: FeatureSet,
    /// Label chosen by the decision table
    pub emotion: EmotionLabel,
    /// Per-category chart scores
    pub spectrum: EmotionSpectrum,
}

/// Analyzer wiring the decoder, feature extractor and classifier together
pub struct EmotionAnalyzer {
    decoder: AudioDecoder,
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl EmotionAnalyzer {
    /// Create a new analyzer, validating the analysis parameters
    pub fn new(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            decoder: AudioDecoder::new(config.sample_rate),
            extractor: FeatureExtractor::new(config)?,
            classifier: Classifier::new(),
        })
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Decode and analyse a file on disk
    pub fn analyze_file(&self, path: &Path) -> Result<SpeechAnalysis, DecodeError> {
        let clip = self.decoder.decode_file(path).map_err(|err| {
            log_decode_error(&err, &path.display().to_string());
            err
        })?;
        Ok(self.analyze_clip(clip))
    }

    /// Decode and analyse an in-memory upload
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        format: Option<AudioFormat>,
    ) -> Result<SpeechAnalysis, DecodeError> {
        let clip = self.decoder.decode_bytes(bytes, format).map_err(|err| {
            log_decode_error(&err, "analyze_bytes");
            err
        })?;
        Ok(self.analyze_clip(clip))
    }

    /// Analyse an already decoded clip
    pub fn analyze_clip(&self, clip: AudioClip) -> SpeechAnalysis {
        let start = Instant::now();

        let features = self.extractor.extract(&clip);
        let emotion = self.classifier.classify(&features);
        let spectrum = EmotionSpectrum::from_features(&features);

        tracing::info!(
            "[Analysis] {:.2}s clip -> pitch={:.2} Hz energy={:.4} zcr={:.4} centroid={:.2} Hz => {} ({:.1} ms)",
            clip.duration_seconds(),
            features.pitch_mean,
            features.energy,
            features.zero_crossing_rate,
            features.spectral_centroid,
            emotion,
            start.elapsed().as_secs_f32() * 1000.0
        );

        SpeechAnalysis {
            clip,
            features,
            emotion,
            spectrum,
        }
    }

    /// Decibel spectrogram of an analysed clip for rendering
    pub fn spectrogram(&self, clip: &AudioClip, top_db: f32) -> DecibelSpectrogram {
        self.extractor.spectrogram(clip).to_decibels(top_db)
    }
}

#[cfg(test)]
mod tests;
