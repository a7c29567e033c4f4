//! Integration tests for the run command.
//!
//! These run the compiled binary against fixtures in temporary directories,
//! using `sh` as a stand-in bundler.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fob_e2e() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fob-e2e"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("fob-e2e.toml"), config).unwrap();
    temp
}

#[test]
fn test_missing_fixture_config_fails() {
    let temp = TempDir::new().unwrap();

    fob_e2e()
        .args(["run", "--no-color"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[cfg(unix)]
#[test]
fn test_run_prints_collected_artifacts() {
    let temp = fixture("[[lib]]\nformat = \"esm\"\n");

    fob_e2e()
        .args(["run", "--no-color", "-q"])
        .arg(temp.path())
        .args([
            "--engine",
            "sh",
            "--arg=-c",
            "--arg=mkdir -p dist/esm && printf 'export {};' > dist/esm/index.js",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("index.js"))
        .stdout(predicate::str::contains("export {};"));
}

#[cfg(unix)]
#[test]
fn test_failing_build_command_reports_output() {
    let temp = fixture("[[lib]]\nformat = \"cjs\"\n");

    fob_e2e()
        .args(["run", "--no-color"])
        .arg(temp.path())
        .args(["--engine", "sh", "--arg=-c", "--arg=echo boom >&2; exit 3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build failed"))
        .stderr(predicate::str::contains("boom"));
}

#[cfg(unix)]
#[test]
fn test_engine_from_settings_file() {
    let temp = fixture("[[lib]]\nformat = \"esm\"\ndts = false\n");
    fs::write(
        temp.path().join("fob-e2e.settings.toml"),
        "[engine]\nprogram = \"sh\"\nargs = [\"-c\", \"mkdir -p dist/esm && touch dist/esm/index.mjs\"]\n",
    )
    .unwrap();

    fob_e2e()
        .args(["run", "--kind", "all", "-q"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"js\""))
        .stdout(predicate::str::contains("index.mjs"));
}
