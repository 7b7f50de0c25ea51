//! Configuration errors: property validation, migration, storage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No such property: {0}")]
    NoSuchProperty(String),

    #[error("Property {0} is not editable")]
    NotEditable(String),

    #[error("Cannot set composite value for {0}")]
    CompositeValue(String),

    #[error("Invalid value: {0}")]
    InvalidLiteral(String),

    #[error("Property {path} should be {expected}, not {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid value for {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Missing required config key: {0}")]
    MissingKey(String),

    #[error("Unsupported config schema version: {0}")]
    UnsupportedVersion(i64),

    #[error("Malformed config data: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// True for errors caused by a bad property path or value (user input), as opposed to storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::NoSuchProperty(_)
                | ConfigError::NotEditable(_)
                | ConfigError::CompositeValue(_)
                | ConfigError::InvalidLiteral(_)
                | ConfigError::TypeMismatch { .. }
                | ConfigError::InvalidValue { .. }
        )
    }
}
