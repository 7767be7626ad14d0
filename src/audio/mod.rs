// Audio module - decoding uploaded files into analysis-ready clips

pub mod clip;
pub mod decoder;
pub mod resample;

// Re-export commonly used types for convenience
pub use clip::AudioClip;
pub use decoder::{AudioDecoder, AudioFormat};
pub use resample::Resampler;
