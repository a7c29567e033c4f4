//! Fixture config discovery
//!
//! Finds and loads the build configuration stored alongside an e2e fixture.
//! Every `lib` entry is composed over the baseline for its format, so a fixture
//! only states what differs from the per-format convention.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::compose::{baseline, compose};
use crate::config::BuildConfiguration;
use crate::error::{ConfigError, Result};
use crate::target::LibFormat;

pub const TOML_CONFIG: &str = "fob-e2e.toml";
pub const JSON_CONFIG: &str = "fob-e2e.json";

/// Fixture configuration discovery
///
/// # Example
///
/// ```no_run
/// use fob_e2e_config::FixtureDiscovery;
///
/// let config = FixtureDiscovery::new("e2e/cases/bundle-false/basic").load().unwrap();
/// assert!(!config.lib.is_empty());
/// ```
pub struct FixtureDiscovery {
    root: PathBuf,
}

impl FixtureDiscovery {
    /// Create a new discovery rooted at a fixture directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the fixture directory
    ///
    /// Searches in this order:
    /// 1. fob-e2e.toml
    /// 2. fob-e2e.json
    pub fn find(&self) -> Option<PathBuf> {
        [TOML_CONFIG, JSON_CONFIG]
            .into_iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the fixture's build configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the fixture has no config file.
    pub fn load(&self) -> Result<BuildConfiguration> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        self.load_from(&path)
    }

    /// Load config from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<BuildConfiguration> {
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading fixture config");

        let value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str::<Value>(&content)
                .map_err(|e| ConfigError::invalid_value("json", format!("Invalid JSON: {e}")))?
        } else {
            let toml_val: toml::Value = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid_value("toml", format!("Invalid TOML syntax: {e}")))?;
            serde_json::to_value(toml_val).map_err(|e| {
                ConfigError::invalid_value("toml", format!("TOML to JSON conversion failed: {e}"))
            })?
        };

        self.compose_value(value)
    }

    /// Build a configuration from a raw fixture value, composing every lib
    /// entry over its format's baseline.
    pub fn compose_value(&self, value: Value) -> Result<BuildConfiguration> {
        let Value::Object(mut map) = value else {
            return Err(ConfigError::invalid_value(
                "config",
                "fixture config must be a table/object",
            ));
        };

        let entries = match map.remove("lib") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ConfigError::invalid_value("lib", "expected an array of lib targets"));
            }
            None => Vec::new(),
        };

        let mut lib = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let format = entry
                .get("format")
                .and_then(Value::as_str)
                .ok_or_else(|| ConfigError::invalid_value(format!("lib[{index}].format"), "missing format"))?
                .parse::<LibFormat>()
                .map_err(|e| ConfigError::invalid_value(format!("lib[{index}].format"), e))?;

            lib.push(compose(&baseline(format, &self.root), entry)?);
        }

        Ok(BuildConfiguration {
            lib,
            passthrough: map,
        })
    }
}
