//! Multi-target build configuration.
//!
//! This module provides the `BuildConfiguration` struct handed to the build
//! engine. For loading one from a fixture directory, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result as ConfigResult};
use crate::target::{LibFormat, LibTargetConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    #[serde(default)]
    pub lib: Vec<LibTargetConfig>,

    /// Engine settings (`source`, `output`, ...) passed through untouched.
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl BuildConfiguration {
    pub fn new(lib: impl IntoIterator<Item = LibTargetConfig>) -> Self {
        Self {
            lib: lib.into_iter().collect(),
            passthrough: Map::new(),
        }
    }

    /// Attach an engine setting at the top level, e.g. `source`.
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.passthrough.insert(key.into(), value);
        self
    }

    /// Create from serde_json::Value (for programmatic config in tests)
    ///
    /// # Example
    ///
    /// ```
    /// use fob_e2e_config::{BuildConfiguration, LibFormat};
    /// use serde_json::json;
    ///
    /// let config = BuildConfiguration::from_value(json!({
    ///     "lib": [{ "format": "esm", "bundle": false }],
    ///     "source": { "entry": { "index": ["./src/**"] } }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.lib[0].format, LibFormat::Esm);
    /// assert!(config.passthrough.contains_key("source"));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("config", e))
    }

    /// Formats configured by more than one target, in first-seen order.
    ///
    /// Results are keyed by format, so for these the last target wins.
    pub fn duplicate_formats(&self) -> Vec<LibFormat> {
        let mut seen: HashMap<LibFormat, usize> = HashMap::new();
        let mut order = Vec::new();
        for target in &self.lib {
            let count = seen.entry(target.format).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(target.format);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_keeps_engine_settings() {
        let config = BuildConfiguration::from_value(json!({
            "lib": [{ "format": "esm" }, { "format": "cjs" }],
            "source": { "entry": { "index": "./src/index.ts" } },
            "output": { "target": "node" }
        }))
        .unwrap();

        assert_eq!(config.lib.len(), 2);
        assert_eq!(config.passthrough["output"]["target"], json!("node"));
    }

    #[test]
    fn to_value_round_trips_passthrough() {
        let config = BuildConfiguration::new([LibTargetConfig::new(LibFormat::Cjs)])
            .with_setting("source", json!({ "entry": { "index": "./src/index.ts" } }));

        let value = config.to_value().unwrap();
        assert_eq!(value["lib"][0]["format"], json!("cjs"));
        assert_eq!(value["source"]["entry"]["index"], json!("./src/index.ts"));
    }

    #[test]
    fn duplicate_formats_are_reported_once() {
        let config = BuildConfiguration::new([
            LibTargetConfig::new(LibFormat::Esm),
            LibTargetConfig::new(LibFormat::Esm),
            LibTargetConfig::new(LibFormat::Cjs),
            LibTargetConfig::new(LibFormat::Esm),
        ]);
        assert_eq!(config.duplicate_formats(), vec![LibFormat::Esm]);
    }
}
