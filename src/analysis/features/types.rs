// Types module - Data structures for audio features
//
// This module defines the core data structures used throughout the feature
// extraction pipeline.

use serde::{Deserialize, Serialize};

/// Features extracted from a whole speech clip
///
/// These four descriptors drive the emotion classifier and the emotion
/// spectrum chart. Every field is always defined; degenerate input (silence)
/// yields zeros rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Mean of the positive pitch estimates across all frames, in Hz
    ///
    /// 0.0 when no frame yields a positive estimate.
    pub pitch_mean: f32,

    /// Mean squared amplitude over the whole clip
    ///
    /// Unitless power proxy; a full-scale sine has energy 0.5.
    pub energy: f32,

    /// Zero-crossing rate averaged over analysis frames (0.0 to 1.0)
    ///
    /// Higher values indicate noisier or fricative-heavy content.
    pub zero_crossing_rate: f32,

    /// Spectral centroid averaged over analysis frames, in Hz
    ///
    /// Measures the "brightness" of the sound.
    pub spectral_centroid: f32,
}

impl FeatureSet {
    pub fn new(
        pitch_mean: f32,
        energy: f32,
        zero_crossing_rate: f32,
        spectral_centroid: f32,
    ) -> Self {
        Self {
            pitch_mean,
            energy,
            zero_crossing_rate,
            spectral_centroid,
        }
    }
}
