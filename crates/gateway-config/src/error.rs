//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a known format
    #[error("unsupported config format for {path}; expected .yaml, .yml, .json or .toml")]
    UnsupportedFormat {
        /// File path
        path: PathBuf,
    },

    /// The file contents did not parse
    #[error("invalid {format} config: {message}")]
    Parse {
        /// Format name
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Structural validation failed
    #[error("config validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An environment override held an unusable value
    #[error("invalid value '{value}' for {var}")]
    InvalidOverride {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}
