//! fob-e2e CLI entry point.
//!
//! Parses arguments, loads harness settings, initializes logging and
//! dispatches to the command.

use clap::Parser;
use fob_e2e_cli::{cli, commands, error, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let result = match args.command {
        cli::Command::Run(run_args) => {
            let settings = commands::run::load_settings(&run_args).map_err(error::cli_error_to_miette)?;
            logger::init_logger(
                args.verbose,
                args.quiet,
                args.no_color,
                settings.log_level.as_deref(),
            );
            commands::run_execute(run_args, settings).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}
