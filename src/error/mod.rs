// Error types for the speech emotion pipeline
//
// This module defines custom error types for decoding, configuration and
// rendering, each carrying a stable numeric code for structured reporting.

mod config;
mod decode;
mod render;

pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use decode::{log_decode_error, DecodeError, DecodeErrorCodes};
pub use render::{log_render_error, RenderError, RenderErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so the CLI and reports can surface them
/// consistently.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
