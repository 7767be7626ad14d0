// FFT module - Short-time Fourier transform
//
// This module handles FFT computation with Hann windowing to reduce spectral
// leakage. Magnitude spectra feed the spectral centroid, the pitch tracker
// and the spectrogram renderer.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::framing::{centered_frame, centered_frame_count, PadMode};
use super::spectrogram::MagnitudeSpectrogram;

/// STFT processor computing magnitude spectra over centered frames
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    n_fft: usize,
    hop_length: usize,
    /// Periodic Hann window (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - FFT size and frame length
    /// * `hop_length` - Hop between successive frames
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        // Periodic Hann: the window repeats with period n_fft
        let window = (0..n_fft)
            .map(|i| {
                0.5 * (1.0 - ((2.0 * std::f32::consts::PI * i as f32) / n_fft as f32).cos())
            })
            .collect();

        let fft = FftPlanner::new().plan_fft_forward(n_fft);

        Self {
            fft,
            n_fft,
            hop_length,
            window,
        }
    }

    /// Number of frequency bins per spectrum (n_fft / 2 + 1)
    pub fn bin_count(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Compute magnitude spectrum of one frame
    ///
    /// Applies the Hann window, performs the FFT, and returns magnitudes for
    /// positive frequencies only. Frames shorter than n_fft are zero-padded.
    pub fn compute_magnitude_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = self
            .window
            .iter()
            .enumerate()
            .map(|(i, &w)| Complex::new(frame.get(i).copied().unwrap_or(0.0) * w, 0.0))
            .collect();

        self.fft.process(&mut buffer);

        buffer[..self.bin_count()].iter().map(|c| c.norm()).collect()
    }

    /// Magnitude spectra of every centered, zero-padded frame of `samples`
    pub fn magnitude_frames(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let count = centered_frame_count(samples.len(), self.hop_length);
        let mut frame = Vec::with_capacity(self.n_fft);
        (0..count)
            .map(|t| {
                centered_frame(
                    samples,
                    t,
                    self.n_fft,
                    self.hop_length,
                    PadMode::Zero,
                    &mut frame,
                );
                self.compute_magnitude_spectrum(&frame)
            })
            .collect()
    }

    /// Full magnitude spectrogram of `samples` at `sample_rate`
    pub fn spectrogram(&self, samples: &[f32], sample_rate: u32) -> MagnitudeSpectrogram {
        MagnitudeSpectrogram::new(
            self.magnitude_frames(samples),
            sample_rate,
            self.n_fft,
            self.hop_length,
        )
    }
}
