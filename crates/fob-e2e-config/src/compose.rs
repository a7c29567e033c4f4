//! Override-wins composition of lib target configurations.
//!
//! Objects merge key by key, recursively. Scalars, arrays and `null` in the
//! override replace whatever the baseline held at that key. Keys the override
//! does not mention keep the baseline's value.

use std::path::Path;

use serde_json::{Value, json};

use crate::error::{ConfigError, Result};
use crate::target::{LibFormat, LibTargetConfig};

/// Merge `update` into `target` in place.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match target_map.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Pure form of [`merge_values`]: neither input is modified.
pub fn merged(baseline: &Value, overrides: &Value) -> Value {
    let mut out = baseline.clone();
    merge_values(&mut out, overrides);
    out
}

/// Compose a finalized lib target from a baseline and a caller override.
///
/// A `null` override means "no override". Anything else must be an object, as
/// must the baseline.
pub fn compose(baseline: &Value, overrides: &Value) -> Result<LibTargetConfig> {
    if !baseline.is_object() {
        return Err(ConfigError::InvalidOverride {
            side: "baseline",
            found: kind_of(baseline).to_string(),
        });
    }

    let value = match overrides {
        Value::Null => baseline.clone(),
        Value::Object(_) => merged(baseline, overrides),
        other => {
            return Err(ConfigError::InvalidOverride {
                side: "override",
                found: kind_of(other).to_string(),
            });
        }
    };

    serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("lib", e))
}

/// Baseline for `format`: the format itself and its per-format dist directory
/// under `cwd`.
pub fn baseline(format: LibFormat, cwd: &Path) -> Value {
    json!({
        "format": format,
        "output": {
            "distPath": {
                "root": cwd.join(format.default_dist_dir()).to_string_lossy(),
            }
        }
    })
}

pub fn generate_lib_config(
    format: LibFormat,
    cwd: &Path,
    overrides: &Value,
) -> Result<LibTargetConfig> {
    compose(&baseline(format, cwd), overrides)
}

pub fn generate_bundle_esm_config(cwd: &Path, overrides: &Value) -> Result<LibTargetConfig> {
    generate_lib_config(LibFormat::Esm, cwd, overrides)
}

pub fn generate_bundle_cjs_config(cwd: &Path, overrides: &Value) -> Result<LibTargetConfig> {
    generate_lib_config(LibFormat::Cjs, cwd, overrides)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
