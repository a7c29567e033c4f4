//! The seam between the harness and the bundler under test.
//!
//! The harness never bundles anything itself. An engine accepts a
//! [`BuildConfiguration`], runs the build to completion and hands back a
//! [`BuildHandle`] that can be inspected afterwards without rebuilding.

mod command;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BuildConfiguration, Result};

pub use command::CommandEngine;

/// A build engine (bundler) driven by the harness.
#[async_trait]
pub trait BuildEngine: Send + Sync {
    /// Run one build of `config`.
    ///
    /// `cwd` is the fixture directory. Fixture-relative settings must be
    /// resolved against it. The future must not resolve until every
    /// sub-build of the engine has finished writing its output.
    async fn build(&self, config: &BuildConfiguration, cwd: &Path) -> Result<Box<dyn BuildHandle>>;

    /// Engines that can only resolve paths against the process working
    /// directory return `true`. The orchestrator then switches the working
    /// directory around the build and serializes such builds process-wide.
    fn requires_process_cwd(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "engine"
    }
}

/// Result of a finished build.
pub trait BuildHandle: Send + Sync {
    /// Configuration the engine actually used for this build.
    fn inspect(&self) -> EngineConfig;

    /// Whether the engine reported the build as successful.
    fn succeeded(&self) -> bool {
        true
    }
}

/// Realized engine configuration, opaque to the harness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// One configuration per underlying bundler compilation.
    #[serde(default)]
    pub bundler_configs: Vec<Value>,

    /// Top-level build tool configuration.
    #[serde(default)]
    pub build_config: Value,
}
