//! Error types for style configuration loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a style configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the configuration file
    #[error("Failed to read config file {path}: {source}", path = .path.display())]
    IoError {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The active palette does not exist in `colors.palettes`
    #[error("Palette \"{name}\" not found. Available: {available}")]
    PaletteNotFound {
        /// Requested palette name
        name: String,
        /// Comma-separated list of the configured palette names
        available: String,
    },

    /// A field holds a value outside of its accepted range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: &'static str,
        /// Human readable explanation
        message: String,
    },
}
