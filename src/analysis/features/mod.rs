// FeatureExtractor - DSP feature extraction for speech emotion classification
//
// This module extracts the four acoustic descriptors the emotion classifier
// works on. Features are computed from time-domain and frequency-domain
// representations of the whole clip.
//
// Module organization:
// - types: Data structures (FeatureSet)
// - framing: Centered frame slicing with zero or edge padding
// - fft: STFT computation with windowing
// - spectrogram: Magnitude and decibel time-frequency matrices
// - spectral: Frequency-domain features (centroid)
// - pitch: Spectral peak tracking (pitch estimates)
// - temporal: Time-domain features (energy, ZCR)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Features extracted:
// 1. Pitch mean: mean of positive peak-tracked frequencies across frames
// 2. Energy: mean squared amplitude over the whole clip
// 3. Zero-Crossing Rate (ZCR): frame-averaged rate of sign changes
// 4. Spectral Centroid: frame-averaged weighted mean frequency
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

mod fft;
mod framing;
mod pitch;
mod spectral;
mod spectrogram;
mod temporal;
mod types;

pub use pitch::PitchPeak;
pub use spectrogram::{DecibelSpectrogram, MagnitudeSpectrogram};
pub use types::FeatureSet;

use crate::audio::AudioClip;
use crate::config::AnalysisConfig;
use crate::error::{log_config_error, ConfigError};

use fft::StftProcessor;
use pitch::PitchTracker;
use spectral::SpectralFeatures;
use temporal::TemporalFeatures;

/// FeatureExtractor coordinates the DSP feature extraction pipeline
///
/// Combines STFT processing, pitch tracking, spectral and temporal feature
/// extraction into a single interface. Sample-rate dependent helpers are
/// built per clip from the clip's own rate.
pub struct FeatureExtractor {
    stft: StftProcessor,
    temporal_features: TemporalFeatures,
    config: AnalysisConfig,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor from validated analysis parameters
    pub fn new(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(|err| {
            log_config_error(&err, "FeatureExtractor::new");
            err
        })?;

        Ok(Self {
            stft: StftProcessor::new(config.n_fft, config.hop_length),
            temporal_features: TemporalFeatures::new(config.n_fft, config.hop_length),
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn pitch_tracker(&self, sample_rate: u32) -> PitchTracker {
        PitchTracker::new(
            sample_rate,
            self.config.n_fft,
            self.config.pitch_fmin,
            self.config.pitch_fmax,
            self.config.pitch_threshold,
        )
    }

    /// Extract all features from a clip
    ///
    /// 1. Compute magnitude spectra of every centered frame
    /// 2. Track pitch peaks and spectral centroid per frame
    /// 3. Compute energy and ZCR in the time domain
    /// 4. Combine into FeatureSet
    pub fn extract(&self, clip: &AudioClip) -> FeatureSet {
        let samples = clip.samples();
        let sample_rate = clip.sample_rate();

        // Compute magnitude spectra
        let frames = self.stft.magnitude_frames(samples);

        // Extract frequency-domain features
        let spectral_features = SpectralFeatures::new(sample_rate, self.config.n_fft);
        let centroid_sum: f64 = frames
            .iter()
            .map(|spectrum| spectral_features.compute_centroid(spectrum) as f64)
            .sum();
        let spectral_centroid = if frames.is_empty() {
            0.0
        } else {
            (centroid_sum / frames.len() as f64) as f32
        };
        let pitch_mean = self.pitch_tracker(sample_rate).mean_pitch(&frames);

        // Extract time-domain features
        let energy = self.temporal_features.compute_energy(samples);
        let zero_crossing_rate = self.temporal_features.compute_zcr(samples);

        let features = FeatureSet {
            pitch_mean,
            energy,
            zero_crossing_rate,
            spectral_centroid,
        };

        log::debug!(
            "[FeatureExtractor] {} samples, {} frames -> {:?}",
            samples.len(),
            frames.len(),
            features
        );

        features
    }

    /// Per-frame pitch peak grid (frames x tracked peaks)
    pub fn pitch_grid(&self, clip: &AudioClip) -> Vec<Vec<PitchPeak>> {
        let tracker = self.pitch_tracker(clip.sample_rate());
        self.stft
            .magnitude_frames(clip.samples())
            .iter()
            .map(|spectrum| tracker.track_frame(spectrum))
            .collect()
    }

    /// Magnitude spectrogram of a clip with the extractor's framing
    pub fn spectrogram(&self, clip: &AudioClip) -> MagnitudeSpectrogram {
        self.stft.spectrogram(clip.samples(), clip.sample_rate())
    }
}
