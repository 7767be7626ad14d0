// AudioClip - immutable mono PCM buffer at a fixed sample rate

/// Decoded mono audio ready for analysis
///
/// Samples are normalized to roughly [-1.0, 1.0]. The clip is immutable once
/// built; each pipeline invocation owns its own clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip length in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Largest absolute sample value (0.0 for an empty clip)
    pub fn peak_amplitude(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, &s| peak.max(s.abs()))
    }
}
