// Pitch module - spectral peak tracking
//
// Each STFT frame is searched for local maxima of the magnitude spectrum that
// lie inside the pitch band and exceed a fraction of the frame's strongest
// bin. Peak positions are refined with parabolic interpolation, giving a
// per-frame grid of (frequency, magnitude) estimates.
//
// References:
// - Smith, J.O. & Serra, X. (1987). PARSHL: an analysis/synthesis program
//   for non-harmonic sounds based on a sinusoidal representation

use serde::Serialize;

/// One tracked spectral peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchPeak {
    /// Interpolated frequency in Hz
    pub frequency: f32,
    /// Interpolated magnitude
    pub magnitude: f32,
}

/// Spectral peak tracker
pub struct PitchTracker {
    sample_rate: u32,
    fft_size: usize,
    fmin: f32,
    fmax: f32,
    threshold: f32,
}

impl PitchTracker {
    /// Create a new pitch tracker
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT size the spectra were computed with
    /// * `fmin` / `fmax` - Search band in Hz (`fmin <= f < fmax`); `fmax` is
    ///   capped at Nyquist
    /// * `threshold` - Minimum magnitude relative to the frame maximum
    pub fn new(sample_rate: u32, fft_size: usize, fmin: f32, fmax: f32, threshold: f32) -> Self {
        Self {
            sample_rate,
            fft_size,
            fmin: fmin.max(0.0),
            fmax: fmax.min(sample_rate as f32 / 2.0),
            threshold,
        }
    }

    /// Track peaks in one magnitude spectrum
    ///
    /// A bin k is a peak when it lies in the band, its magnitude exceeds
    /// `threshold * max(spectrum)`, and it is a local maximum of the
    /// thresholded spectrum (strictly above the lower neighbour, at least the
    /// upper one).
    pub fn track_frame(&self, spectrum: &[f32]) -> Vec<PitchPeak> {
        let n = spectrum.len();
        if n < 3 {
            return Vec::new();
        }

        let frame_max = spectrum.iter().fold(0.0f32, |acc, &mag| acc.max(mag));
        let reference = self.threshold * frame_max;
        let gated = |k: usize| {
            let mag = spectrum[k];
            if mag > reference {
                mag
            } else {
                0.0
            }
        };

        let bin_width = self.sample_rate as f32 / self.fft_size as f32;
        let mut peaks = Vec::new();

        for k in 0..n {
            let freq = k as f32 * bin_width;
            if freq < self.fmin || freq >= self.fmax {
                continue;
            }

            let current = gated(k);
            let below = if k == 0 { current } else { gated(k - 1) };
            let above = if k + 1 == n { current } else { gated(k + 1) };
            if !(current > below && current >= above) {
                continue;
            }

            let (shift, skew) = self.interpolate(spectrum, k);
            peaks.push(PitchPeak {
                frequency: (k as f32 + shift) * bin_width,
                magnitude: spectrum[k] + skew,
            });
        }

        peaks
    }

    /// Parabolic interpolation around bin k
    ///
    /// Returns (bin offset, magnitude correction). Edge bins are not
    /// interpolated.
    fn interpolate(&self, spectrum: &[f32], k: usize) -> (f32, f32) {
        if k == 0 || k + 1 >= spectrum.len() {
            return (0.0, 0.0);
        }

        let (prev, cur, next) = (spectrum[k - 1], spectrum[k], spectrum[k + 1]);
        let avg = 0.5 * (next - prev);
        let mut curvature = 2.0 * cur - next - prev;
        if curvature.abs() < f32::MIN_POSITIVE {
            curvature += 1.0;
        }
        let shift = avg / curvature;
        (shift, 0.5 * avg * shift)
    }

    /// Mean of all strictly positive peak frequencies over `frames`
    ///
    /// Returns 0 when no frame yields a positive estimate.
    pub fn mean_pitch<'a, I>(&self, frames: I) -> f32
    where
        I: IntoIterator<Item = &'a Vec<f32>>,
    {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for spectrum in frames {
            for peak in self.track_frame(spectrum) {
                if peak.frequency > 0.0 {
                    sum += peak.frequency as f64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            0.0
        } else {
            (sum / count as f64) as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PitchTracker {
        // 10 Hz bins
        PitchTracker::new(1000, 100, 150.0, 400.0, 0.1)
    }

    fn spectrum_with_peak(bin: usize, neighbours: (f32, f32)) -> Vec<f32> {
        let mut spectrum = vec![0.0; 51];
        spectrum[bin - 1] = neighbours.0;
        spectrum[bin] = 1.0;
        spectrum[bin + 1] = neighbours.1;
        spectrum
    }

    #[test]
    fn test_symmetric_peak_is_not_shifted() {
        let peaks = tracker().track_frame(&spectrum_with_peak(20, (0.5, 0.5)));
        assert_eq!(peaks.len(), 1);
        assert!((peaks[0].frequency - 200.0).abs() < 1e-3);
        assert!((peaks[0].magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_asymmetric_peak_is_interpolated_upward() {
        let peaks = tracker().track_frame(&spectrum_with_peak(20, (0.2, 0.6)));
        assert_eq!(peaks.len(), 1);
        // avg = 0.2, curvature = 1.2, shift = 1/6 bin
        assert!((peaks[0].frequency - (20.0 + 1.0 / 6.0) * 10.0).abs() < 1e-3);
        assert!(peaks[0].magnitude > 1.0);
    }

    #[test]
    fn test_out_of_band_peaks_are_ignored() {
        // 100 Hz is below fmin, 450 Hz above fmax
        assert!(tracker()
            .track_frame(&spectrum_with_peak(10, (0.5, 0.5)))
            .is_empty());
        assert!(tracker()
            .track_frame(&spectrum_with_peak(45, (0.5, 0.5)))
            .is_empty());
    }

    #[test]
    fn test_weak_peaks_below_threshold_are_ignored() {
        let mut spectrum = spectrum_with_peak(20, (0.5, 0.5));
        // Local maximum at 300 Hz but only 5% of the frame maximum
        spectrum[30] = 0.05;
        let peaks = tracker().track_frame(&spectrum);
        assert_eq!(peaks.len(), 1);
    }

    #[test]
    fn test_plateau_reports_first_bin_only() {
        let mut spectrum = vec![0.0; 51];
        spectrum[20] = 1.0;
        spectrum[21] = 1.0;
        let peaks = tracker().track_frame(&spectrum);
        assert_eq!(peaks.len(), 1);
    }

    #[test]
    fn test_mean_pitch_of_silence_is_zero() {
        let frames = vec![vec![0.0; 51]; 4];
        assert_eq!(tracker().mean_pitch(&frames), 0.0);
    }

    #[test]
    fn test_mean_pitch_averages_all_peaks() {
        let mut two_peaks = spectrum_with_peak(20, (0.5, 0.5));
        two_peaks[29] = 0.5;
        two_peaks[30] = 1.0;
        two_peaks[31] = 0.5;
        let frames = vec![two_peaks, spectrum_with_peak(16, (0.5, 0.5))];
        // (200 + 300 + 160) / 3
        assert!((tracker().mean_pitch(&frames) - 220.0).abs() < 1e-3);
    }
}
