//! Lib target configuration types.
//!
//! A lib target is one output variant of a library build: a module format plus
//! its bundling and declaration settings. Field names follow the camelCase
//! shape the bundler under test reads, so fixtures can be written the same way
//! the bundler's own configs are.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Module format of a lib target. Used as the aggregation key for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibFormat {
    /// ECMAScript modules
    Esm,
    /// CommonJS
    Cjs,
    /// Universal module definition
    Umd,
    /// Module federation
    Mf,
    /// Immediately invoked function expression
    Iife,
}

impl LibFormat {
    pub const ALL: [LibFormat; 5] = [
        LibFormat::Esm,
        LibFormat::Cjs,
        LibFormat::Umd,
        LibFormat::Mf,
        LibFormat::Iife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibFormat::Esm => "esm",
            LibFormat::Cjs => "cjs",
            LibFormat::Umd => "umd",
            LibFormat::Mf => "mf",
            LibFormat::Iife => "iife",
        }
    }

    /// Conventional output directory for this format, relative to the fixture.
    ///
    /// Every format gets its own directory so that targets never collide.
    pub fn default_dist_dir(&self) -> PathBuf {
        Path::new("dist").join(self.as_str())
    }
}

impl fmt::Display for LibFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LibFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown lib format: {s}"))
    }
}

/// Configuration for a single lib target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibTargetConfig {
    pub format: LibFormat,

    /// Bundle mode. `false` maps every source module to its own output file.
    #[serde(default = "default_true")]
    pub bundle: bool,

    #[serde(default)]
    pub output: OutputOptions,

    /// Declaration generation: `false` disables it, an object enables it.
    /// Left unset, declarations are expected next to the code output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dts: Option<DtsSetting>,

    /// Per-target settings the harness passes through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    #[serde(default)]
    pub dist_path: DistPath,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DtsSetting {
    Enabled(bool),
    Options(DtsOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DtsOptions {
    /// Bundle declarations into a single file per entry
    #[serde(default)]
    pub bundle: bool,

    /// Declaration output directory. Defaults to the code output root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist_path: Option<PathBuf>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl LibTargetConfig {
    pub fn new(format: LibFormat) -> Self {
        Self {
            format,
            bundle: true,
            output: OutputOptions::default(),
            dts: None,
            extra: Map::new(),
        }
    }

    pub fn with_bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output.dist_path.root = Some(root.into());
        self
    }

    pub fn with_dts(mut self, dts: DtsSetting) -> Self {
        self.dts = Some(dts);
        self
    }

    /// Declarations are generated unless explicitly turned off.
    pub fn declarations_enabled(&self) -> bool {
        !matches!(self.dts, Some(DtsSetting::Enabled(false)))
    }

    /// Output root resolved against `cwd`, if one is configured.
    pub fn output_root(&self, cwd: &Path) -> Option<PathBuf> {
        self.output
            .dist_path
            .root
            .as_deref()
            .map(|root| resolve(cwd, root))
    }

    /// Directory declarations land in, resolved against `cwd`.
    ///
    /// `None` when declarations are disabled or no directory can be derived.
    pub fn declarations_dir(&self, cwd: &Path) -> Option<PathBuf> {
        match &self.dts {
            Some(DtsSetting::Enabled(false)) => None,
            Some(DtsSetting::Options(DtsOptions {
                dist_path: Some(dir),
                ..
            })) => Some(resolve(cwd, dir)),
            _ => self.output_root(cwd),
        }
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}
