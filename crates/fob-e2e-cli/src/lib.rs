//! fob-e2e CLI - run library build fixtures from the command line.
//!
//! This crate wraps the [`fob_e2e`] harness in a small command-line tool:
//! it loads a fixture, drives one build through an external command and
//! prints the collected artifacts as JSON.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - Command implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_e2e_cli::logger;
//!
//! logger::init_logger(false, false, false, None);
//! tracing::info!("ready");
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
