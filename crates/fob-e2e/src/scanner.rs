//! Artifact scanning.
//!
//! For each lib target, walks the directory its output of a given kind lands
//! in and reads every matching file. A missing directory or an unreadable file
//! only shrinks the result; neither is an error.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::aggregate::TargetScan;
use crate::{BuildConfiguration, LibTargetConfig};

const CODE_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs"];
const DECLARATION_EXTENSIONS: &[&str] = &[".d.ts", ".d.cts", ".d.mts"];
const SOURCE_MAP_SUFFIX: &str = ".map";

/// What kind of output a scan collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Compiled JavaScript
    #[serde(alias = "js")]
    Code,
    /// Type declarations
    #[serde(alias = "dts")]
    Declaration,
}

impl ArtifactKind {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Code => CODE_EXTENSIONS,
            ArtifactKind::Declaration => DECLARATION_EXTENSIONS,
        }
    }

    /// Whether a file name belongs to this kind. Source maps never do.
    pub fn matches(&self, file_name: &str) -> bool {
        !file_name.ends_with(SOURCE_MAP_SUFFIX)
            && self
                .extensions()
                .iter()
                .any(|ext| file_name.len() > ext.len() && file_name.ends_with(ext))
    }

    /// Directory a target's artifacts of this kind are written to.
    ///
    /// `None` means the target produces nothing of this kind and is skipped.
    pub fn scan_root(&self, target: &LibTargetConfig, cwd: &Path) -> Option<PathBuf> {
        match self {
            ArtifactKind::Code => target.output_root(cwd),
            ArtifactKind::Declaration => target.declarations_dir(cwd),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Code => f.write_str("js"),
            ArtifactKind::Declaration => f.write_str("dts"),
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "js" | "code" => Ok(ArtifactKind::Code),
            "dts" | "declaration" | "declarations" => Ok(ArtifactKind::Declaration),
            other => Err(format!("Invalid artifact kind: {}", other)),
        }
    }
}

/// A file found by a scan. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
}

/// Scan one target's output of `kind`, sorted by path.
pub fn scan(target: &LibTargetConfig, kind: ArtifactKind, cwd: &Path) -> Vec<ArtifactRecord> {
    match kind.scan_root(target, cwd) {
        Some(dir) => scan_directory(&dir, kind),
        None => {
            tracing::debug!(format = %target.format, %kind, "no scan directory for target");
            Vec::new()
        }
    }
}

/// Scan every target of `config` in parallel.
///
/// Targets without a scan directory for `kind` are left out. The returned
/// scans keep the configuration's target order.
pub fn scan_targets(config: &BuildConfiguration, cwd: &Path, kind: ArtifactKind) -> Vec<TargetScan> {
    config
        .lib
        .par_iter()
        .filter_map(|target| {
            let dir = kind.scan_root(target, cwd)?;
            let records = scan_directory(&dir, kind);
            tracing::debug!(format = %target.format, %kind, count = records.len(), "scanned target");
            Some(TargetScan {
                format: target.format,
                bundle: target.bundle,
                records,
            })
        })
        .collect()
}

/// Collect every file of `kind` under `dir`, recursively.
///
/// Paths are absolute when `dir` is, and sorted byte-wise so that ordering is
/// stable across platforms and runs.
pub fn scan_directory(dir: &Path, kind: ArtifactKind) -> Vec<ArtifactRecord> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "output directory does not exist");
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| kind.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    paths
        .into_iter()
        .filter_map(|path| match fs::read_to_string(&path) {
            Ok(content) => Some(ArtifactRecord {
                path,
                content,
                kind,
            }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable artifact");
                None
            }
        })
        .collect()
}
