//! Runs exactly one build per harness call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::engine::{BuildEngine, BuildHandle, EngineConfig};
use crate::{BuildConfiguration, Result};

/// Serializes builds that need the process working directory.
static PROCESS_CWD: Mutex<()> = Mutex::const_new(());

/// Drives a [`BuildEngine`] for a fixture.
#[derive(Clone)]
pub struct BuildOrchestrator {
    engine: Arc<dyn BuildEngine>,
}

impl BuildOrchestrator {
    pub fn new(engine: Arc<dyn BuildEngine>) -> Self {
        Self { engine }
    }

    /// Build `config` for the fixture at `fixture_dir` and wait for it to finish.
    ///
    /// A relative `fixture_dir` is resolved against the process working
    /// directory once, before the build; the engine and the returned run only
    /// ever see the absolute path. Engine errors propagate unchanged.
    pub async fn build(&self, config: &BuildConfiguration, fixture_dir: &Path) -> Result<BuildRun> {
        tracing::debug!(
            engine = self.engine.name(),
            fixture = %fixture_dir.display(),
            targets = config.lib.len(),
            "starting build"
        );

        let (fixture_dir, handle) = if self.engine.requires_process_cwd() {
            let _lock = PROCESS_CWD.lock().await;
            let fixture_dir = std::env::current_dir()?.join(fixture_dir);
            let _cwd = CwdGuard::enter(&fixture_dir)?;
            let handle = self.engine.build(config, &fixture_dir).await?;
            (fixture_dir, handle)
        } else {
            let fixture_dir = absolute_dir(fixture_dir).await?;
            let handle = self.engine.build(config, &fixture_dir).await?;
            (fixture_dir, handle)
        };

        let run = BuildRun::new(handle, fixture_dir);
        tracing::debug!(success = run.succeeded(), "build finished");
        Ok(run)
    }
}

/// Resolve `dir` against the process working directory.
///
/// The working directory is read under the lock process-cwd builds hold, so a
/// concurrent build can never be observed mid-switch.
pub(crate) async fn absolute_dir(dir: &Path) -> std::io::Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let _lock = PROCESS_CWD.lock().await;
    Ok(std::env::current_dir()?.join(dir))
}

/// A finished build.
///
/// The engine configuration is captured once when the build completes, so
/// inspecting never re-runs anything.
pub struct BuildRun {
    handle: Box<dyn BuildHandle>,
    engine_config: EngineConfig,
    fixture_dir: PathBuf,
}

impl BuildRun {
    pub fn new(handle: Box<dyn BuildHandle>, fixture_dir: PathBuf) -> Self {
        let engine_config = handle.inspect();
        Self {
            handle,
            engine_config,
            fixture_dir,
        }
    }

    /// Absolute fixture directory the build ran for.
    pub fn fixture_dir(&self) -> &Path {
        &self.fixture_dir
    }

    pub fn inspect(&self) -> &EngineConfig {
        &self.engine_config
    }

    pub fn succeeded(&self) -> bool {
        self.handle.succeeded()
    }
}

/// Restores the previous working directory when dropped.
struct CwdGuard {
    previous: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> std::io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self { previous })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!(
                dir = %self.previous.display(),
                error = %e,
                "failed to restore working directory"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, LibFormat, LibTargetConfig};
    use async_trait::async_trait;
    use serde_json::json;
    use serial_test::serial;
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    struct Inspectable(bool);

    impl BuildHandle for Inspectable {
        fn inspect(&self) -> EngineConfig {
            EngineConfig {
                bundler_configs: vec![json!({ "target": "node" })],
                build_config: json!({ "lib": 1 }),
            }
        }

        fn succeeded(&self) -> bool {
            self.0
        }
    }

    /// Records the working directory each build observed.
    #[derive(Default)]
    struct CwdRecorder {
        process_cwd: bool,
        seen: StdMutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl BuildEngine for CwdRecorder {
        async fn build(&self, _config: &BuildConfiguration, _cwd: &Path) -> Result<Box<dyn BuildHandle>> {
            self.seen.lock().unwrap().push(std::env::current_dir()?);
            Ok(Box::new(Inspectable(true)))
        }

        fn requires_process_cwd(&self) -> bool {
            self.process_cwd
        }
    }

    struct Rejecting;

    #[async_trait]
    impl BuildEngine for Rejecting {
        async fn build(&self, _config: &BuildConfiguration, _cwd: &Path) -> Result<Box<dyn BuildHandle>> {
            Err(Error::build_failure("entry not found"))
        }
    }

    fn config() -> BuildConfiguration {
        BuildConfiguration::new([LibTargetConfig::new(LibFormat::Esm)])
    }

    #[tokio::test]
    async fn run_exposes_engine_config_and_outcome() {
        let orchestrator = BuildOrchestrator::new(Arc::new(CwdRecorder::default()));
        let fixture = TempDir::new().unwrap();

        let run = orchestrator.build(&config(), fixture.path()).await.unwrap();
        assert!(run.succeeded());
        assert_eq!(run.inspect().bundler_configs.len(), 1);
        assert_eq!(run.inspect().build_config["lib"], 1);
    }

    #[tokio::test]
    async fn engine_errors_propagate() {
        let orchestrator = BuildOrchestrator::new(Arc::new(Rejecting));
        let fixture = TempDir::new().unwrap();

        let err = orchestrator.build(&config(), fixture.path()).await.err().unwrap();
        assert!(matches!(err, Error::BuildFailure { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn explicit_cwd_engines_leave_process_cwd_alone() {
        let before = std::env::current_dir().unwrap();
        let recorder = Arc::new(CwdRecorder::default());
        let orchestrator = BuildOrchestrator::new(recorder.clone());
        let fixture = TempDir::new().unwrap();

        orchestrator.build(&config(), fixture.path()).await.unwrap();
        assert_eq!(recorder.seen.lock().unwrap()[0], before);
    }

    #[tokio::test]
    #[serial]
    async fn process_cwd_engines_see_fixture_and_cwd_is_restored() {
        let before = std::env::current_dir().unwrap();
        let recorder = Arc::new(CwdRecorder {
            process_cwd: true,
            ..Default::default()
        });
        let orchestrator = BuildOrchestrator::new(recorder.clone());
        let fixture = TempDir::new().unwrap();

        orchestrator.build(&config(), fixture.path()).await.unwrap();

        let seen = recorder.seen.lock().unwrap()[0].clone();
        assert_eq!(seen.canonicalize().unwrap(), fixture.path().canonicalize().unwrap());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    /// Writes a single bundle into each target's output root, resolved
    /// against the directory it was handed.
    struct WritesBundle {
        process_cwd: bool,
        handed: StdMutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl BuildEngine for WritesBundle {
        async fn build(&self, config: &BuildConfiguration, cwd: &Path) -> Result<Box<dyn BuildHandle>> {
            *self.handed.lock().unwrap() = Some(cwd.to_path_buf());
            for target in &config.lib {
                if let Some(root) = target.output_root(cwd) {
                    std::fs::create_dir_all(&root)?;
                    std::fs::write(root.join("index.js"), "export {};")?;
                }
            }
            Ok(Box::new(Inspectable(true)))
        }

        fn requires_process_cwd(&self) -> bool {
            self.process_cwd
        }
    }

    #[tokio::test]
    #[serial]
    async fn relative_fixture_resolves_once_for_process_cwd_engines() {
        let workspace = TempDir::new().unwrap();
        std::fs::create_dir(workspace.path().join("fx")).unwrap();
        let _outer = CwdGuard::enter(workspace.path()).unwrap();
        let expected = std::env::current_dir().unwrap().join("fx");

        let engine = Arc::new(WritesBundle {
            process_cwd: true,
            handed: StdMutex::new(None),
        });
        let config = BuildConfiguration::new([
            LibTargetConfig::new(LibFormat::Esm).with_output_root("dist/esm")
        ]);

        let result = crate::Harness::new(engine.clone())
            .build_config_and_get_results(&config, Path::new("fx"), crate::ArtifactKind::Code)
            .await
            .unwrap();

        assert_eq!(engine.handed.lock().unwrap().as_deref(), Some(expected.as_path()));
        assert_eq!(result.files(LibFormat::Esm), [expected.join("dist/esm/index.js")]);
        assert!(!expected.join("fx").exists());
        assert_eq!(Some(std::env::current_dir().unwrap().as_path()), expected.parent());
    }

    #[tokio::test]
    #[serial]
    async fn relative_fixture_is_absolute_for_explicit_cwd_engines() {
        let workspace = TempDir::new().unwrap();
        let _outer = CwdGuard::enter(workspace.path()).unwrap();
        let expected = std::env::current_dir().unwrap().join("fx");

        let engine = Arc::new(WritesBundle {
            process_cwd: false,
            handed: StdMutex::new(None),
        });
        let config = BuildConfiguration::new([
            LibTargetConfig::new(LibFormat::Cjs).with_output_root("dist/cjs")
        ]);

        let run = BuildOrchestrator::new(engine.clone())
            .build(&config, Path::new("fx"))
            .await
            .unwrap();

        assert_eq!(run.fixture_dir(), expected.as_path());
        assert!(expected.join("dist/cjs/index.js").is_file());
    }
}
