//! Harness entry points: load a fixture, build it once, collect results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::aggregate::{AggregatedResult, AllResults, ArtifactSet, aggregate};
use crate::engine::BuildEngine;
use crate::orchestrator::{BuildOrchestrator, BuildRun, absolute_dir};
use crate::scanner::{ArtifactKind, scan_targets};
use crate::{BuildConfiguration, FixtureDiscovery, Result};

/// Scan and aggregate the output of an already finished build.
///
/// Runs on a blocking thread; targets are scanned in parallel.
pub async fn get_results(
    config: &BuildConfiguration,
    cwd: &Path,
    kind: ArtifactKind,
) -> Result<ArtifactSet> {
    let config = config.clone();
    let cwd = cwd.to_path_buf();
    let set = tokio::task::spawn_blocking(move || aggregate(scan_targets(&config, &cwd, kind))).await?;
    Ok(set)
}

/// Builds fixtures through one engine.
///
/// Every call loads a fresh configuration and runs a fresh build; nothing is
/// cached between calls.
#[derive(Clone)]
pub struct Harness {
    orchestrator: BuildOrchestrator,
}

impl Harness {
    pub fn new(engine: Arc<dyn BuildEngine>) -> Self {
        Self {
            orchestrator: BuildOrchestrator::new(engine),
        }
    }

    pub fn with_engine(engine: impl BuildEngine + 'static) -> Self {
        Self::new(Arc::new(engine))
    }

    /// Scan and aggregate without building; see [`get_results`].
    pub async fn get_results(
        &self,
        config: &BuildConfiguration,
        cwd: &Path,
        kind: ArtifactKind,
    ) -> Result<ArtifactSet> {
        get_results(config, cwd, kind).await
    }

    /// Load the fixture's config, build it and collect artifacts of `kind`.
    pub async fn build_and_get_results(
        &self,
        fixture_dir: impl AsRef<Path>,
        kind: ArtifactKind,
    ) -> Result<AggregatedResult> {
        let (fixture_dir, config) = load_fixture(fixture_dir.as_ref()).await?;
        self.build_config_and_get_results(&config, &fixture_dir, kind)
            .await
    }

    /// Like [`build_and_get_results`](Self::build_and_get_results) but collects
    /// both code and declarations from the same build.
    pub async fn build_and_get_all_results(
        &self,
        fixture_dir: impl AsRef<Path>,
    ) -> Result<AllResults> {
        let (fixture_dir, config) = load_fixture(fixture_dir.as_ref()).await?;
        let run = self.build(&config, &fixture_dir).await?;

        let js = get_results(&config, run.fixture_dir(), ArtifactKind::Code).await?;
        let dts = get_results(&config, run.fixture_dir(), ArtifactKind::Declaration).await?;

        Ok(AllResults {
            js: into_result(js, &run),
            dts: into_result(dts, &run),
        })
    }

    /// Build a programmatic configuration for a fixture directory.
    ///
    /// Output is scanned relative to the absolute fixture directory the build
    /// ran for, even when `fixture_dir` is relative.
    pub async fn build_config_and_get_results(
        &self,
        config: &BuildConfiguration,
        fixture_dir: &Path,
        kind: ArtifactKind,
    ) -> Result<AggregatedResult> {
        let run = self.build(config, fixture_dir).await?;
        let set = get_results(config, run.fixture_dir(), kind).await?;
        Ok(into_result(set, &run))
    }

    async fn build(&self, config: &BuildConfiguration, fixture_dir: &Path) -> Result<BuildRun> {
        fob_e2e_config::validate(config)?;
        self.orchestrator.build(config, fixture_dir).await
    }
}

async fn load_fixture(fixture_dir: &Path) -> Result<(PathBuf, BuildConfiguration)> {
    let fixture_dir = absolute_dir(fixture_dir).await?;
    let config = FixtureDiscovery::new(&fixture_dir).load()?;
    Ok((fixture_dir, config))
}

fn into_result(artifacts: ArtifactSet, run: &BuildRun) -> AggregatedResult {
    tracing::info!(
        formats = artifacts.files.len(),
        success = run.succeeded(),
        "collected build results"
    );
    AggregatedResult {
        artifacts,
        engine_config: run.inspect().clone(),
        success: run.succeeded(),
    }
}
