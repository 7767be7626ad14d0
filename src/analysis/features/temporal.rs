// Temporal module - Time-domain feature extraction
//
// This module computes features directly from time-domain audio signals:
// whole-clip energy and the frame-averaged zero-crossing rate.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::framing::{centered_frame, centered_frame_count, PadMode};

/// Samples with magnitude at or below this value count as exact zeros
const ZERO_THRESHOLD: f32 = 1e-10;

/// Temporal feature computation functions
pub struct TemporalFeatures {
    frame_length: usize,
    hop_length: usize,
}

impl TemporalFeatures {
    /// Create a new temporal features processor
    ///
    /// # Arguments
    /// * `frame_length` - Zero-crossing analysis frame length in samples
    /// * `hop_length` - Hop between successive frames
    pub fn new(frame_length: usize, hop_length: usize) -> Self {
        Self {
            frame_length,
            hop_length,
        }
    }

    /// Compute energy as the mean squared amplitude over the whole signal
    ///
    /// No framing is applied. Returns 0 for an empty signal.
    pub fn compute_energy(&self, audio: &[f32]) -> f32 {
        if audio.is_empty() {
            return 0.0;
        }
        let sum: f64 = audio.iter().map(|&x| (x as f64) * (x as f64)).sum();
        (sum / audio.len() as f64) as f32
    }

    /// Compute the zero-crossing rate of one frame
    ///
    /// Counts sign changes between adjacent samples and divides by the frame
    /// length. Near-zero samples are treated as zero and zero counts as
    /// positive.
    ///
    /// # Returns
    /// Zero-crossing rate (0.0 to 1.0)
    pub fn compute_frame_zcr(&self, frame: &[f32]) -> f32 {
        if frame.len() < 2 {
            return 0.0;
        }

        let is_negative = |x: f32| x < -ZERO_THRESHOLD;
        let crossings = frame
            .windows(2)
            .filter(|pair| is_negative(pair[0]) != is_negative(pair[1]))
            .count();

        crossings as f32 / frame.len() as f32
    }

    /// Compute the zero-crossing rate averaged over centered frames
    ///
    /// Frames are padded by repeating the boundary samples.
    pub fn compute_zcr(&self, audio: &[f32]) -> f32 {
        if audio.is_empty() {
            return 0.0;
        }

        let count = centered_frame_count(audio.len(), self.hop_length);
        let mut frame = Vec::with_capacity(self.frame_length);
        let mut total = 0.0f64;
        for t in 0..count {
            centered_frame(
                audio,
                t,
                self.frame_length,
                self.hop_length,
                PadMode::Edge,
                &mut frame,
            );
            total += self.compute_frame_zcr(&frame) as f64;
        }

        (total / count as f64) as f32
    }
}
