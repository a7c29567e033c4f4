//! # fob-e2e
//!
//! End-to-end harness for library builds.
//!
//! Given a fixture whose configuration declares one or more lib targets, the
//! harness runs a single build through a [`BuildEngine`], then scans every
//! target's output directory and aggregates what it finds so tests can assert
//! on exact file sets and contents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fob_e2e::{ArtifactKind, CommandEngine, Harness, LibFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let harness = Harness::with_engine(CommandEngine::new("npx").args(["rslib", "build"]));
//! let result = harness
//!     .build_and_get_results("e2e/cases/bundle-false/basic", ArtifactKind::Code)
//!     .await?;
//!
//! assert!(result.success);
//! for file in result.files(LibFormat::Esm) {
//!     println!("{}", file.display());
//! }
//! # Ok(()) }
//! ```
//!
//! Fixture directories are passed explicitly all the way down to the engine;
//! the process working directory is never changed unless an engine asks for
//! it (see [`BuildEngine::requires_process_cwd`]).

pub mod aggregate;
pub mod engine;
pub mod harness;
pub mod orchestrator;
pub mod scanner;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

// Re-export the configuration model
pub use fob_e2e_config::{
    BuildConfiguration, ConfigError, DtsOptions, DtsSetting, FixtureDiscovery, HarnessSettings,
    LibFormat, LibTargetConfig, generate_bundle_cjs_config, generate_bundle_esm_config,
    generate_lib_config,
};

pub use aggregate::{AggregatedResult, AllResults, ArtifactSet, TargetScan, aggregate};
pub use engine::{BuildEngine, BuildHandle, CommandEngine, EngineConfig};
pub use harness::{Harness, get_results};
pub use orchestrator::{BuildOrchestrator, BuildRun};
pub use scanner::{ArtifactKind, ArtifactRecord, scan, scan_directory, scan_targets};

/// Error types for harness operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fixture or lib target configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The build engine rejected the build or failed while running it.
    #[error("Build failed: {message}")]
    BuildFailure {
        message: String,
        /// Captured diagnostic output from the engine, if any.
        output: Option<String>,
    },

    /// The external build command could not be started.
    #[error("Failed to start build command '{program}': {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking scan task panicked or was cancelled.
    #[error("Scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn build_failure(message: impl Into<String>) -> Self {
        Error::BuildFailure {
            message: message.into(),
            output: None,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Config(_) => "INVALID_CONFIG",
            Error::BuildFailure { .. } => "BUILD_FAILURE",
            Error::EngineSpawn { .. } => "ENGINE_SPAWN",
            Error::Io(_) => "IO_ERROR",
            Error::Join(_) => "SCAN_TASK_FAILED",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Config(ConfigError::NotFound(dir)) => Some(Box::new(format!(
                "Add a fob-e2e.toml or fob-e2e.json to {} describing its lib targets.",
                dir.display()
            ))),
            Error::Config(ConfigError::NoTargets) => Some(Box::new(
                "Declare at least one [[lib]] target with a format.",
            )),
            Error::Config(_) => Some(Box::new(
                "Check the fixture config for syntax errors and field types.",
            )),
            Error::BuildFailure {
                output: Some(output),
                ..
            } if !output.trim().is_empty() => Some(Box::new(format!(
                "Build output:\n{}",
                output.trim_end()
            ))),
            Error::EngineSpawn { program, .. } => Some(Box::new(format!(
                "Make sure '{}' is installed and on PATH, or configure engine.program in fob-e2e.settings.toml.",
                program
            ))),
            _ => None,
        }
    }
}
