//! Settings: command-line flags layered over an optional config file

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use kubemgr_k8s::{ConnectOptions, DEFAULT_NAMESPACE};
use serde::Deserialize;

use crate::cli::{Args, OutputFormat};

/// Lines fetched by `logs` when neither flag nor config file say otherwise
pub const DEFAULT_TAIL_LINES: i64 = 100;

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub namespace: Option<String>,
    pub tail_lines: Option<i64>,
    pub timeout_secs: Option<u64>,
    pub context: Option<String>,
}

impl FileConfig {
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kubemgr").join("config.toml"))
    }

    /// Load the config file
    ///
    /// An explicit path must exist. The default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading config file");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(tail) = config.tail_lines {
            anyhow::ensure!(tail > 0, "tail_lines must be positive, got {tail}");
        }
        Ok(config)
    }
}

/// Resolved settings for one invocation
#[derive(Clone, Debug)]
pub struct Settings {
    pub default_namespace: String,
    pub tail_lines: i64,
    pub output: OutputFormat,
    pub connect: ConnectOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            tail_lines: DEFAULT_TAIL_LINES,
            output: OutputFormat::Table,
            connect: ConnectOptions::default(),
        }
    }
}

impl Settings {
    /// Flags win over the file, the file wins over built-in defaults
    pub fn resolve(args: &Args, file: FileConfig) -> Self {
        let timeout = args
            .timeout
            .or(file.timeout_secs)
            .map(Duration::from_secs);

        Self {
            default_namespace: file
                .namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            tail_lines: file.tail_lines.unwrap_or(DEFAULT_TAIL_LINES),
            output: args.output,
            connect: ConnectOptions {
                kubeconfig: args.kubeconfig.clone(),
                context: args.context.clone().or(file.context),
                timeout,
            },
        }
    }
}
