//! Error types for Glint

use thiserror::Error;

/// The main error type for Glint operations
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Unknown preset: {name} is not one of {allowed:?}")]
    UnknownPreset { name: String, allowed: Vec<String> },

    #[error("Scene has been shut down; no further updates are accepted")]
    SceneClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for GlintError {
    fn from(err: toml::ser::Error) -> Self {
        GlintError::TomlSerError(err.to_string())
    }
}
