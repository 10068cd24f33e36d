//! Error types for settings loading and validation.

use thiserror::Error;

/// Settings error type
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A configuration value failed validation
    #[error("Invalid setting '{field}': {reason}")]
    InvalidValue {
        /// The offending field, dotted path form.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The file extension is not a supported configuration format
    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat {
        /// The rejected extension.
        extension: String,
    },

    /// Failed to read or write the configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML configuration
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to parse or serialize JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using SettingsError
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;
