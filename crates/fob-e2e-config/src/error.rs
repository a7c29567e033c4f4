//! Error types for lib target composition and fixture loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Fixture loading errors
    #[error("no fob-e2e config found in {0}")]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Composition errors
    #[error("invalid {side} for lib target: expected an object, found {found}")]
    InvalidOverride { side: &'static str, found: String },

    // Schema errors
    #[error("build configuration has no lib targets")]
    NoTargets,

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, hint: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.to_string()),
        }
    }
}
