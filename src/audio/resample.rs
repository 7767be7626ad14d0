//! Audio resampling to the analysis sample rate.

use rubato::{FftFixedInOut, Resampler as RubatoResampler};

use crate::error::DecodeError;

/// Input chunk size handed to the FFT resampler
const CHUNK_SIZE: usize = 1024;

/// Mono resampler converting decoded audio to a fixed target rate.
pub struct Resampler {
    target_sample_rate: u32,
}

impl Resampler {
    /// Create a new resampler with target sample rate.
    pub fn new(target_sample_rate: u32) -> Self {
        Self { target_sample_rate }
    }

    pub fn target_sample_rate(&self) -> u32 {
        self.target_sample_rate
    }

    /// Number of output samples produced for `input_len` samples at `source_rate`
    pub fn output_len(&self, input_len: usize, source_rate: u32) -> usize {
        if source_rate == 0 {
            return 0;
        }
        let numerator = input_len as u64 * self.target_sample_rate as u64;
        numerator.div_ceil(source_rate as u64) as usize
    }

    /// Resample mono samples from `source_rate` to the target rate.
    ///
    /// Output length is `ceil(len * target / source)`. The resampler's own
    /// output delay is dropped from the front, and the tail is flushed by
    /// feeding zero-padded chunks until the delayed output is complete.
    pub fn resample(&self, samples: &[f32], source_rate: u32) -> Result<Vec<f32>, DecodeError> {
        if source_rate == 0 {
            return Err(DecodeError::ResampleFailed {
                reason: "source sample rate is 0".to_string(),
            });
        }
        if source_rate == self.target_sample_rate || samples.is_empty() {
            return Ok(samples.to_vec());
        }

        let expected_len = self.output_len(samples.len(), source_rate);

        let mut resampler = FftFixedInOut::<f32>::new(
            source_rate as usize,
            self.target_sample_rate as usize,
            CHUNK_SIZE,
            1, // mono
        )
        .map_err(|e| DecodeError::ResampleFailed {
            reason: format!("failed to create resampler: {}", e),
        })?;
        let delay = resampler.output_delay();

        log::debug!(
            "[Resampler] {} Hz -> {} Hz ({} -> {} samples, delay {})",
            source_rate,
            self.target_sample_rate,
            samples.len(),
            expected_len,
            delay
        );

        let mut output = Vec::with_capacity(expected_len + delay + CHUNK_SIZE);
        let mut pos = 0;
        while output.len() < expected_len + delay {
            let needed = resampler.input_frames_next();
            let mut chunk = vec![0.0f32; needed];
            if pos < samples.len() {
                let end = (pos + needed).min(samples.len());
                chunk[..end - pos].copy_from_slice(&samples[pos..end]);
            }
            pos += needed;

            let input_chunk = vec![chunk];
            let output_chunk =
                resampler
                    .process(&input_chunk, None)
                    .map_err(|e| DecodeError::ResampleFailed {
                        reason: e.to_string(),
                    })?;
            output.extend_from_slice(&output_chunk[0]);
        }

        output.drain(..delay);
        output.truncate(expected_len);
        Ok(output)
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(crate::config::TARGET_SAMPLE_RATE)
    }
}
