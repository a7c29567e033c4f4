//! Settings for the harness itself (not the build under test).
//!
//! Priority: environment variables > settings file > defaults.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const SETTINGS_FILE: &str = "fob-e2e.settings.toml";
pub const ENV_PREFIX: &str = "FOB_E2E_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessSettings {
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub engine: EngineSettings,
}

/// External build command used by the command-driven engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["rslib".to_string(), "build".to_string()],
            env: BTreeMap::new(),
        }
    }
}

impl HarnessSettings {
    /// Load settings, layering `fob-e2e.settings.toml` in `dir` (if present)
    /// and `FOB_E2E_*` variables over the defaults.
    ///
    /// Nested keys use `__`, e.g. `FOB_E2E_ENGINE__PROGRAM=pnpm`.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let file = dir.join(SETTINGS_FILE);
        if file.is_file() {
            figment = figment.merge(Toml::file(file));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::invalid_value("settings", e))
    }
}
