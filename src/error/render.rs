// Render error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Render error code constants
///
/// Error code range: 4001-4002
pub struct RenderErrorCodes {}

impl RenderErrorCodes {
    /// Output directory could not be created
    pub const OUTPUT_DIR: i32 = 4001;

    /// An artifact could not be written
    pub const WRITE_FAILED: i32 = 4002;
}

/// Log a render error with structured context
pub fn log_render_error(err: &RenderError, context: &str) {
    error!(
        "Render error in {}: code={}, component=Renderer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while persisting rendered artifacts
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Output directory could not be created
    OutputDir { path: String, reason: String },

    /// Artifact file could not be written
    WriteFailed { path: String, reason: String },
}

impl ErrorCode for RenderError {
    fn code(&self) -> i32 {
        match self {
            RenderError::OutputDir { .. } => RenderErrorCodes::OUTPUT_DIR,
            RenderError::WriteFailed { .. } => RenderErrorCodes::WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            RenderError::OutputDir { path, reason } => {
                format!("Cannot create output directory {}: {}", path, reason)
            }
            RenderError::WriteFailed { path, reason } => {
                format!("Failed to write {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RenderError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_codes() {
        let err = RenderError::WriteFailed {
            path: "out/waveform.svg".to_string(),
            reason: "read-only".to_string(),
        };
        assert_eq!(err.code(), RenderErrorCodes::WRITE_FAILED);
        assert!(err.message().contains("out/waveform.svg"));

        let err = RenderError::OutputDir {
            path: "out".to_string(),
            reason: "denied".to_string(),
        };
        assert_eq!(err.code(), RenderErrorCodes::OUTPUT_DIR);
    }
}
