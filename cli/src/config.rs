//! Configuration for the `todo` command.
//!
//! Priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env`)
//! 3. TOML config file (`--config <path>`, else `./todo.toml` if present)
//! 4. Compiled defaults
//!
//! A missing default file is not an error. An explicit `--config` path that
//! cannot be read is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

pub const DEFAULT_CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage a todo list on a remote todo service")]
pub struct CliArgs {
    /// API root of the todo service, e.g. http://localhost:8000/api
    #[arg(long, env = "TODO_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TODO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "TODO_LOG")]
    pub log_level: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show all todos.
    List,
    /// Add a todo.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a todo between done and not done. Accepts a unique id prefix.
    Toggle { id: String },
    /// Delete a todo. Accepts a unique id prefix.
    Delete { id: String },
    /// Remove every completed todo.
    ClearCompleted,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(10),
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, file))
    }

    fn resolve(cli: &CliArgs, file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            api_url: cli
                .api_url
                .clone()
                .or(file.api_url)
                .unwrap_or(defaults.api_url),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map_or(defaults.timeout, Duration::from_secs),
            log_level: cli
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }
}

fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigFile::default());
        }
        Err(source) => return Err(ConfigError::ReadFile { path, source }),
    };
    parse_config_file(&raw)
}

fn parse_config_file(raw: &str) -> Result<ConfigFile, ConfigError> {
    Ok(toml::from_str(raw)?)
}
