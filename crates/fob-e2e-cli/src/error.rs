//! Error handling for the fob-e2e CLI.
//!
//! Harness errors already carry miette diagnostics (codes and help text), so
//! they are reported as-is. The remaining variants are plain messages.

use fob_e2e_config::ConfigError;
use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Harness failure: configuration, build or scan.
    #[error(transparent)]
    Harness(#[from] fob_e2e::Error),

    /// Harness settings could not be loaded.
    #[error("Settings error: {0}")]
    Settings(#[from] ConfigError),

    /// Result could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Harness(e) => Report::new(e),
        CliError::Settings(e) => Report::new(fob_e2e::Error::Config(e)),
        CliError::Json(e) => miette::miette!("Failed to render result: {}", e),
    }
}
