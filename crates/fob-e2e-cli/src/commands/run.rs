//! `fob-e2e run`: build one fixture and print what it produced.

use fob_e2e::{CommandEngine, Harness, HarnessSettings};
use serde_json::Value;

use crate::cli::RunArgs;
use crate::error::Result;

/// Load harness settings for the fixture being run.
///
/// `fob-e2e.settings.toml` is looked up in the fixture directory.
pub fn load_settings(args: &RunArgs) -> Result<HarnessSettings> {
    Ok(HarnessSettings::load(&args.fixture)?)
}

/// Execute the run command, writing the result JSON to stdout.
pub async fn execute(args: RunArgs, settings: HarnessSettings) -> Result<()> {
    let output = collect(&args, &settings).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Build the fixture and collect the requested artifacts as JSON.
pub async fn collect(args: &RunArgs, settings: &HarnessSettings) -> Result<Value> {
    let engine = engine_for(args, settings);
    tracing::info!(
        fixture = %args.fixture.display(),
        engine = engine.program(),
        "building fixture"
    );

    let harness = Harness::with_engine(engine);
    let output = match args.kind.artifact_kind() {
        Some(kind) => {
            let result = harness.build_and_get_results(&args.fixture, kind).await?;
            if !result.success {
                tracing::warn!("engine reported the build as failed");
            }
            serde_json::to_value(result)?
        }
        None => serde_json::to_value(harness.build_and_get_all_results(&args.fixture).await?)?,
    };

    Ok(output)
}

/// `--engine` replaces the configured command; `--arg` values are appended
/// to whichever command is used.
fn engine_for(args: &RunArgs, settings: &HarnessSettings) -> CommandEngine {
    let engine = match &args.engine {
        Some(program) => CommandEngine::new(program.clone()),
        None => CommandEngine::from_settings(&settings.engine),
    };
    engine.args(args.args.iter().cloned())
}
