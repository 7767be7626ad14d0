// Spectrogram module - time-frequency magnitude matrices
//
// The magnitude spectrogram is shared between the feature extractor and the
// renderer. The decibel view follows the usual amplitude-to-dB convention:
// 20 * log10(max(amin, |X|)) relative to a reference of 1.0, with everything
// more than top_db below the peak clipped to that floor.

use serde::Serialize;

/// Smallest magnitude considered before taking the logarithm
const AMPLITUDE_MIN: f32 = 1e-5;

/// Magnitude STFT frames (frames x bins)
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeSpectrogram {
    frames: Vec<Vec<f32>>,
    sample_rate: u32,
    n_fft: usize,
    hop_length: usize,
}

impl MagnitudeSpectrogram {
    pub fn new(frames: Vec<Vec<f32>>, sample_rate: u32, n_fft: usize, hop_length: usize) -> Self {
        Self {
            frames,
            sample_rate,
            n_fft,
            hop_length,
        }
    }

    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn bin_count(&self) -> usize {
        self.n_fft / 2 + 1
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Center frequency of bin `k` in Hz
    pub fn bin_frequency(&self, k: usize) -> f32 {
        k as f32 * self.sample_rate as f32 / self.n_fft as f32
    }

    /// Convert magnitudes to decibels, clipped `top_db` below the peak
    pub fn to_decibels(&self, top_db: f32) -> DecibelSpectrogram {
        let mut frames: Vec<Vec<f32>> = self
            .frames
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .map(|&mag| 20.0 * mag.max(AMPLITUDE_MIN).log10())
                    .collect()
            })
            .collect();

        let max_db = frames
            .iter()
            .flatten()
            .fold(f32::NEG_INFINITY, |acc, &db| acc.max(db));
        let max_db = if max_db.is_finite() {
            max_db
        } else {
            20.0 * AMPLITUDE_MIN.log10()
        };
        let floor = max_db - top_db;

        for value in frames.iter_mut().flatten() {
            *value = value.max(floor);
        }

        DecibelSpectrogram {
            frames,
            sample_rate: self.sample_rate,
            n_fft: self.n_fft,
            hop_length: self.hop_length,
            max_db,
            min_db: floor,
        }
    }
}

/// Decibel-scaled spectrogram handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecibelSpectrogram {
    frames: Vec<Vec<f32>>,
    sample_rate: u32,
    n_fft: usize,
    hop_length: usize,
    max_db: f32,
    min_db: f32,
}

impl DecibelSpectrogram {
    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn bin_count(&self) -> usize {
        self.n_fft / 2 + 1
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Highest frequency represented (Nyquist)
    pub fn max_frequency(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Time covered by the frames, in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.frames.len() * self.hop_length) as f32 / self.sample_rate as f32
    }

    pub fn max_db(&self) -> f32 {
        self.max_db
    }

    pub fn min_db(&self) -> f32 {
        self.min_db
    }
}
