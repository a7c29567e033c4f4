//! Engine that runs an external build command.
//!
//! The serialized [`BuildConfiguration`] is written to a scratch file whose
//! path is exported as `FOB_E2E_CONFIG`. The command may write its realized
//! configuration as JSON (an [`EngineConfig`]) to the path in
//! `FOB_E2E_INSPECT`; if it doesn't, inspection reports the configuration the
//! harness sent.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use super::{BuildEngine, BuildHandle, EngineConfig};
use crate::{BuildConfiguration, Error, Result};

pub const CONFIG_ENV: &str = "FOB_E2E_CONFIG";
pub const INSPECT_ENV: &str = "FOB_E2E_INSPECT";
pub const FIXTURE_ENV: &str = "FOB_E2E_FIXTURE";

/// Builder-style engine wrapping an external command.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn from_settings(settings: &fob_e2e_config::EngineSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
            env: settings.env.clone(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl BuildEngine for CommandEngine {
    async fn build(&self, config: &BuildConfiguration, cwd: &Path) -> Result<Box<dyn BuildHandle>> {
        let scratch = tempfile::Builder::new().prefix("fob-e2e-").tempdir()?;
        let config_path = scratch.path().join("config.json");
        let inspect_path = scratch.path().join("inspect.json");

        let config_value = config.to_value()?;
        let serialized = serde_json::to_vec_pretty(&config_value)
            .map_err(|e| Error::build_failure(format!("failed to serialize config: {e}")))?;
        tokio::fs::write(&config_path, serialized).await?;

        tracing::debug!(
            command = %self.command_line(),
            cwd = %cwd.display(),
            "running build command"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .envs(&self.env)
            .env(CONFIG_ENV, &config_path)
            .env(INSPECT_ENV, &inspect_path)
            .env(FIXTURE_ENV, cwd)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::EngineSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stdout));
            let message = match output.status.code() {
                Some(code) => format!("'{}' exited with code {}", self.command_line(), code),
                None => format!("'{}' was terminated by a signal", self.command_line()),
            };
            return Err(Error::BuildFailure {
                message,
                output: Some(captured),
            });
        }

        let engine_config = match tokio::fs::read_to_string(&inspect_path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                Error::build_failure(format!("invalid inspect output from build command: {e}"))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => EngineConfig {
                bundler_configs: Vec::new(),
                build_config: json!({
                    "command": self.command_line(),
                    "config": config_value,
                }),
            },
            Err(e) => return Err(Error::Io(e)),
        };

        Ok(Box::new(CommandBuild { engine_config }))
    }

    fn name(&self) -> &str {
        &self.program
    }
}

struct CommandBuild {
    engine_config: EngineConfig,
}

impl BuildHandle for CommandBuild {
    fn inspect(&self) -> EngineConfig {
        self.engine_config.clone()
    }
}
