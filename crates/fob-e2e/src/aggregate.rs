//! Assembles per-target scans into the result tests assert on.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::LibFormat;
use crate::engine::EngineConfig;
use crate::scanner::ArtifactRecord;

/// Everything one target produced of the scanned kind.
#[derive(Debug, Clone)]
pub struct TargetScan {
    pub format: LibFormat,
    pub bundle: bool,
    pub records: Vec<ArtifactRecord>,
}

/// Scanned artifacts keyed by format.
///
/// A format with no artifacts has no key at all in any map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSet {
    pub files: IndexMap<LibFormat, Vec<PathBuf>>,
    pub contents: IndexMap<LibFormat, IndexMap<PathBuf, String>>,
    /// Content of the single output of a bundle-mode target.
    pub entries: IndexMap<LibFormat, String>,
    /// Path of the single output of a bundle-mode target.
    pub entry_files: IndexMap<LibFormat, PathBuf>,
}

impl ArtifactSet {
    /// Sorted file list for `format`; empty when it produced nothing.
    pub fn files(&self, format: LibFormat) -> &[PathBuf] {
        self.files.get(&format).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn content(&self, format: LibFormat, path: &Path) -> Option<&str> {
        self.contents.get(&format)?.get(path).map(String::as_str)
    }

    pub fn entry(&self, format: LibFormat) -> Option<&str> {
        self.entries.get(&format).map(String::as_str)
    }

    pub fn entry_file(&self, format: LibFormat) -> Option<&Path> {
        self.entry_files.get(&format).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Fold target scans into an [`ArtifactSet`].
///
/// Scans are applied in order, so when two targets share a format the later
/// one replaces the earlier one's files, contents and entry. The entry
/// shortcut is only filled for bundle-mode targets with exactly one artifact.
pub fn aggregate(scans: impl IntoIterator<Item = TargetScan>) -> ArtifactSet {
    let mut set = ArtifactSet::default();

    for scan in scans {
        if scan.records.is_empty() {
            continue;
        }

        let format = scan.format;
        set.entries.shift_remove(&format);
        set.entry_files.shift_remove(&format);

        if let (true, [only]) = (scan.bundle, scan.records.as_slice()) {
            set.entries.insert(format, only.content.clone());
            set.entry_files.insert(format, only.path.clone());
        }

        let mut files = Vec::with_capacity(scan.records.len());
        let mut contents = IndexMap::with_capacity(scan.records.len());
        for record in scan.records {
            files.push(record.path.clone());
            contents.insert(record.path, record.content);
        }

        set.files.insert(format, files);
        set.contents.insert(format, contents);
    }

    set
}

/// Outcome of one harness call for one artifact kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    #[serde(flatten)]
    pub artifacts: ArtifactSet,
    pub engine_config: EngineConfig,
    /// Build outcome as reported by the engine.
    pub success: bool,
}

impl AggregatedResult {
    pub fn files(&self, format: LibFormat) -> &[PathBuf] {
        self.artifacts.files(format)
    }

    pub fn content(&self, format: LibFormat, path: &Path) -> Option<&str> {
        self.artifacts.content(format, path)
    }

    pub fn entry(&self, format: LibFormat) -> Option<&str> {
        self.artifacts.entry(format)
    }

    pub fn entry_file(&self, format: LibFormat) -> Option<&Path> {
        self.artifacts.entry_file(format)
    }
}

/// Code and declaration results from a single build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllResults {
    pub js: AggregatedResult,
    pub dts: AggregatedResult,
}
