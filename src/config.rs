//! Configuration management for analysis and rendering parameters
//!
//! This module provides runtime configuration loading from JSON files so the
//! STFT framing, pitch search band and artifact dimensions can be tuned
//! without recompilation. The emotion thresholds are not configurable; they
//! live as constants in [`crate::analysis::classifier`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Sample rate every clip is resampled to before analysis
pub const TARGET_SAMPLE_RATE: u32 = 22_050;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
}

/// Feature extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analysis sample rate in Hz
    pub sample_rate: u32,
    /// FFT size and analysis frame length in samples
    pub n_fft: usize,
    /// Hop between successive frames in samples
    pub hop_length: usize,
    /// Lowest frequency considered by the pitch tracker (inclusive)
    pub pitch_fmin: f32,
    /// Highest frequency considered by the pitch tracker (exclusive)
    pub pitch_fmax: f32,
    /// Peak threshold relative to the per-frame spectral maximum
    pub pitch_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: TARGET_SAMPLE_RATE,
            n_fft: 2048,
            hop_length: 512,
            pitch_fmin: 150.0,
            pitch_fmax: 4000.0,
            pitch_threshold: 0.1,
        }
    }
}

impl AnalysisConfig {
    /// Check parameter ranges before building an extractor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid("sample_rate", "must be > 0"));
        }
        if self.n_fft < 4 || self.n_fft % 2 != 0 {
            return Err(ConfigError::invalid(
                "n_fft",
                format!("must be an even number >= 4 (got {})", self.n_fft),
            ));
        }
        if self.hop_length == 0 || self.hop_length > self.n_fft {
            return Err(ConfigError::invalid(
                "hop_length",
                format!("must be in 1..={} (got {})", self.n_fft, self.hop_length),
            ));
        }
        if !(self.pitch_fmin >= 0.0 && self.pitch_fmin < self.pitch_fmax) {
            return Err(ConfigError::invalid(
                "pitch_fmin",
                format!(
                    "must satisfy 0 <= pitch_fmin < pitch_fmax (got {} / {})",
                    self.pitch_fmin, self.pitch_fmax
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.pitch_threshold) {
            return Err(ConfigError::invalid(
                "pitch_threshold",
                format!("must be within [0, 1] (got {})", self.pitch_threshold),
            ));
        }
        Ok(())
    }
}

/// Artifact rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Artifact width in pixels
    pub width: u32,
    /// Artifact height in pixels
    pub height: u32,
    /// Maximum heatmap cells along the time axis
    pub spectrogram_max_columns: usize,
    /// Maximum heatmap cells along the frequency axis
    pub spectrogram_max_rows: usize,
    /// Dynamic range of the spectrogram below its peak, in dB
    pub top_db: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            spectrogram_max_columns: 480,
            spectrogram_max_rows: 256,
            top_db: 80.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Chart margins take up to 160 px horizontally and 90 px vertically
        if self.width < 200 || self.height < 150 {
            return Err(ConfigError::invalid(
                "width/height",
                format!("must be at least 200x150 (got {}x{})", self.width, self.height),
            ));
        }
        if self.spectrogram_max_columns == 0 || self.spectrogram_max_rows == 0 {
            return Err(ConfigError::invalid(
                "spectrogram_max_columns/rows",
                "must be > 0",
            ));
        }
        if !(self.top_db > 0.0) {
            return Err(ConfigError::invalid(
                "top_db",
                format!("must be > 0 (got {})", self.top_db),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// Missing or malformed files fall back to the default configuration
    /// with a warning; missing fields are filled from defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log::warn!("[Config] {}. Using defaults.", err);
                Self::default()
            }
        }
    }

    /// Load configuration from JSON file, reporting read and parse failures
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|err| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.render.validate()
    }
}
