//! Error types for the settings crate.
//!
//! Configuration problems are fatal by design: the machine must not
//! move on a half-understood parameter set. Recoverable oddities in a
//! configuration file (unknown keys, malformed lines) are warnings
//! through the diagnostics sink, not errors.

use std::io;
use thiserror::Error;
use wallplot_core::PlotterError;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error while reading or writing a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration validation error occurred.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The parsed frame failed engine-level validation.
    #[error("invalid frame: {0}")]
    Frame(#[from] PlotterError),
}

/// Errors related to configuration content.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required configuration key never appeared.
    #[error("missing configuration key: {0}")]
    MissingKey(&'static str),

    /// A configuration value could not be parsed for its key.
    #[error("invalid value for '{key}': {value}")]
    InvalidValue {
        /// The key whose value was rejected.
        key: String,
        /// The rejected value text.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let err = SettingsError::from(ConfigError::MissingKey("span"));
        assert!(err.to_string().contains("span"));
    }
}
