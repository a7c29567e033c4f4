//! Schema checks for build configurations (no filesystem access).

use crate::config::BuildConfiguration;
use crate::error::{ConfigError, Result};

/// Validate a build configuration before it reaches the engine.
///
/// Duplicate formats are allowed: results are keyed by format and the last
/// target wins, which is logged rather than rejected.
///
/// # Example
///
/// ```
/// use fob_e2e_config::{validate, BuildConfiguration, LibFormat, LibTargetConfig};
///
/// let config = BuildConfiguration::new([LibTargetConfig::new(LibFormat::Esm)]);
/// validate(&config).unwrap();
/// ```
pub fn validate(config: &BuildConfiguration) -> Result<()> {
    if config.lib.is_empty() {
        return Err(ConfigError::NoTargets);
    }

    for format in config.duplicate_formats() {
        tracing::warn!(
            %format,
            "format configured by more than one lib target; later results overwrite earlier ones"
        );
    }

    Ok(())
}
