//! Command-line interface definition for fob-e2e.
//!
//! # Command Structure
//!
//! - `fob-e2e run` - Build a fixture and print its collected artifacts

mod commands;
pub mod enums;
mod tests;

use clap::Parser;

pub use commands::{Command, RunArgs};
pub use enums::*;

/// fob-e2e - end-to-end runner for library build fixtures
#[derive(Parser, Debug)]
#[command(
    name = "fob-e2e",
    version,
    about = "Build a library fixture and report what it produced",
    long_about = "fob-e2e runs one build of a fixture through an external bundler command,\n\
                  then scans every lib target's output directory and prints the files,\n\
                  contents and entries it found as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
