//! Logging infrastructure for the fob-e2e CLI.
//!
//! Logs go to stderr so stdout carries only the result JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_e2e_cli::logger::init_logger;
//!
//! // Debug logging, no colors
//! init_logger(true, false, true, None);
//! ```

use fob_e2e::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 3] = ["fob_e2e", "fob_e2e_config", "fob_e2e_cli"];

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for fob-e2e crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. `level` from harness settings (`log_level`), else info
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, level: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet, level))
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool, level: Option<&str>) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        let level = level
            .and_then(|l| l.parse::<LogLevel>().ok())
            .unwrap_or(LogLevel::Info);
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directives(&level.to_string())))
    }
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
