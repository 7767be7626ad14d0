// Decode error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Decode error code constants
///
/// Error code range: 2001-2006
pub struct DecodeErrorCodes {}

impl DecodeErrorCodes {
    /// Input contained no bytes or decoded to zero samples
    pub const EMPTY_INPUT: i32 = 2001;

    /// Input is not one of the accepted container formats
    pub const UNSUPPORTED_FORMAT: i32 = 2002;

    /// Input claims a supported format but could not be parsed
    pub const MALFORMED: i32 = 2003;

    /// Container has no decodable audio track
    pub const NO_AUDIO_TRACK: i32 = 2004;

    /// Conversion to the analysis sample rate failed
    pub const RESAMPLE_FAILED: i32 = 2005;

    /// Reading the input from disk failed
    pub const IO: i32 = 2006;
}

/// Log a decode error with structured context
///
/// Logs the numeric code, the component and the human-readable message.
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, component=Decoder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while turning an uploaded file into an [`AudioClip`]
///
/// Every variant is terminal for the invocation that produced it: the
/// pipeline does not proceed to feature extraction or rendering.
///
/// [`AudioClip`]: crate::audio::AudioClip
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// No bytes, or no samples after decoding
    EmptyInput,

    /// Format outside the accepted set (WAV, MP3)
    UnsupportedFormat { format: String },

    /// Header or packet data could not be parsed
    Malformed { reason: String },

    /// The container holds no audio track
    NoAudioTrack,

    /// Resampler construction or processing failed
    ResampleFailed { reason: String },

    /// Underlying I/O failure
    Io { details: String },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::EmptyInput => DecodeErrorCodes::EMPTY_INPUT,
            DecodeError::UnsupportedFormat { .. } => DecodeErrorCodes::UNSUPPORTED_FORMAT,
            DecodeError::Malformed { .. } => DecodeErrorCodes::MALFORMED,
            DecodeError::NoAudioTrack => DecodeErrorCodes::NO_AUDIO_TRACK,
            DecodeError::ResampleFailed { .. } => DecodeErrorCodes::RESAMPLE_FAILED,
            DecodeError::Io { .. } => DecodeErrorCodes::IO,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::EmptyInput => "Audio input is empty".to_string(),
            DecodeError::UnsupportedFormat { format } => {
                format!("Unsupported audio format: {} (expected wav or mp3)", format)
            }
            DecodeError::Malformed { reason } => {
                format!("Could not parse audio: {}", reason)
            }
            DecodeError::NoAudioTrack => "No supported audio track found".to_string(),
            DecodeError::ResampleFailed { reason } => {
                format!("Resampling failed: {}", reason)
            }
            DecodeError::Io { details } => format!("I/O error: {}", details),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecodeError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DecodeError {}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io {
            details: err.to_string(),
        }
    }
}

impl From<hound::Error> for DecodeError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => io.into(),
            other => DecodeError::Malformed {
                reason: other.to_string(),
            },
        }
    }
}
