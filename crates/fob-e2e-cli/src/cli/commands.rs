use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::Kind;

/// Available fob-e2e subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a fixture and print the collected artifacts
    ///
    /// Loads the fixture's fob-e2e.toml (or fob-e2e.json), runs the build
    /// command once inside the fixture directory and scans each lib target's
    /// output.
    Run(RunArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Fixture directory containing fob-e2e.toml or fob-e2e.json
    #[arg(value_name = "FIXTURE")]
    pub fixture: PathBuf,

    /// Which artifacts to collect
    ///
    /// - js: compiled code (.js, .cjs, .mjs)
    /// - dts: type declarations (.d.ts, .d.cts, .d.mts)
    /// - all: both, from a single build
    #[arg(short, long, value_enum, default_value = "js")]
    pub kind: Kind,

    /// Build program to run instead of the configured one
    ///
    /// Replaces both the program and the arguments from
    /// fob-e2e.settings.toml.
    #[arg(short, long, value_name = "PROGRAM")]
    pub engine: Option<String>,

    /// Extra argument for the build program (repeatable)
    ///
    /// Examples:
    ///   fob-e2e run fixtures/basic --engine sh --arg=-c --arg "npm run build"
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,
}
