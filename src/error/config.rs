// Configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 3001-3002
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// A parameter is outside its valid range
    pub const INVALID_PARAMETER: i32 = 3001;

    /// Config file exists but could not be read or parsed
    pub const UNREADABLE: i32 = 3002;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Config error in {}: code={}, component=Config, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Parameter value rejected by validation
    InvalidParameter { name: String, reason: String },

    /// Config file could not be read or parsed
    Unreadable { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidParameter { .. } => ConfigErrorCodes::INVALID_PARAMETER,
            ConfigError::Unreadable { .. } => ConfigErrorCodes::UNREADABLE,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidParameter { name, reason } => {
                format!("Invalid parameter '{}': {}", name, reason)
            }
            ConfigError::Unreadable { path, reason } => {
                format!("Cannot load config {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
