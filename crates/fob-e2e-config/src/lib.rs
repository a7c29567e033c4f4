//! Configuration model for fob e2e library builds.
//!
//! Lib targets are composed from a per-format baseline plus an override,
//! collected into a [`BuildConfiguration`], and loaded from fixture
//! directories with [`FixtureDiscovery`].

pub mod compose;
pub mod config;
pub mod discovery;
pub mod error;
pub mod settings;
pub mod target;
pub mod validation;

// Re-export main types
pub use compose::{
    baseline, compose, generate_bundle_cjs_config, generate_bundle_esm_config,
    generate_lib_config, merge_values, merged,
};
pub use config::*;
pub use discovery::FixtureDiscovery;
pub use error::*;
pub use settings::{EngineSettings, HarnessSettings};
pub use target::{DistPath, DtsOptions, DtsSetting, LibFormat, LibTargetConfig, OutputOptions};
pub use validation::validate;
