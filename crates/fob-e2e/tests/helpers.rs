//! Shared test utilities for fob-e2e tests
//!
//! `FakeEngine` stands in for a real bundler: for every lib target it writes
//! deterministic outputs derived from a fixed set of source modules, honoring
//! bundle mode and declaration settings.

#![allow(dead_code)]

use async_trait::async_trait;
use fob_e2e::{
    BuildConfiguration, BuildEngine, BuildHandle, EngineConfig, Error, LibFormat, Result,
};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Source modules of the default fixture: (module path without extension, body)
pub const SOURCES: &[(&str, &str)] = &[
    ("index", "export { greet } from './utils/greet';"),
    ("utils/greet", "export const greet = (name) => `hello ${name}`;"),
    ("utils/shout", "export const shout = (s) => s.toUpperCase();"),
];

#[derive(Default)]
pub struct FakeEngine {
    skip: HashSet<LibFormat>,
    reject: bool,
    report_failure: bool,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce no output at all for `format`.
    pub fn skip(mut self, format: LibFormat) -> Self {
        self.skip.insert(format);
        self
    }

    /// Fail the build instead of producing a handle.
    pub fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }

    /// Produce output but report the build as failed.
    pub fn reporting_failure(mut self) -> Self {
        self.report_failure = true;
        self
    }
}

pub fn code_extension(format: LibFormat) -> &'static str {
    match format {
        LibFormat::Cjs => "cjs",
        LibFormat::Esm => "mjs",
        _ => "js",
    }
}

pub fn compiled(format: LibFormat, body: &str) -> String {
    format!("/* {format} */\n{body}\n")
}

fn write(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

#[async_trait]
impl BuildEngine for FakeEngine {
    async fn build(&self, config: &BuildConfiguration, cwd: &Path) -> Result<Box<dyn BuildHandle>> {
        if self.reject {
            return Err(Error::build_failure("cannot resolve entry './src/index.ts'"));
        }

        let mut bundler_configs = Vec::new();
        for target in &config.lib {
            bundler_configs.push(json!({ "format": target.format, "bundle": target.bundle }));
            if self.skip.contains(&target.format) {
                continue;
            }

            let ext = code_extension(target.format);
            if let Some(root) = target.output_root(cwd) {
                if target.bundle {
                    let body: Vec<&str> = SOURCES.iter().map(|(_, body)| *body).collect();
                    let file = root.join(format!("index.{ext}"));
                    write(&file, &compiled(target.format, &body.join("\n")))?;
                    write(&root.join(format!("index.{ext}.map")), "{}")?;
                } else {
                    for (module, body) in SOURCES {
                        let file = root.join(format!("{module}.{ext}"));
                        write(&file, &compiled(target.format, body))?;
                        write(&root.join(format!("{module}.{ext}.map")), "{}")?;
                    }
                }
            }

            if let Some(dir) = target.declarations_dir(cwd) {
                let modules: &[(&str, &str)] = if target.bundle { &SOURCES[..1] } else { SOURCES };
                for (module, _) in modules {
                    write(&dir.join(format!("{module}.d.ts")), "export {};\n")?;
                }
            }
        }

        Ok(Box::new(FakeBuild {
            engine_config: EngineConfig {
                bundler_configs,
                build_config: config.to_value()?,
            },
            succeeded: !self.report_failure,
        }))
    }
}

struct FakeBuild {
    engine_config: EngineConfig,
    succeeded: bool,
}

impl BuildHandle for FakeBuild {
    fn inspect(&self) -> EngineConfig {
        self.engine_config.clone()
    }

    fn succeeded(&self) -> bool {
        self.succeeded
    }
}

/// Create a fixture directory containing `fob-e2e.toml`.
pub fn fixture(config_toml: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("fob-e2e.toml"), config_toml).expect("write fixture config");
    dir
}
