//! Command implementations for the fob-e2e CLI.
//!
//! - [`run`] - Build a fixture and print its collected artifacts

pub mod run;

pub use run::execute as run_execute;
