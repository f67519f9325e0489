use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings, distinct from the button snapshot itself.
///
/// Loaded from `config.toml` under the platform config directory; a
/// missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub notification_ttl_secs: u64,
    /// Reload and rebuild when the store file changes on disk.
    pub watch_store: bool,
    /// Workspace root used when none is given on the command line.
    pub default_shell_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            notification_ttl_secs: default_notification_ttl(),
            watch_store: true,
            default_shell_dir: None,
        }
    }
}

fn default_tick_rate() -> u64 {
    250
}

fn default_notification_ttl() -> u64 {
    4
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "launchdeck")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn data_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "launchdeck")
        .context("Could not determine data directory")?
        .data_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Log destination while the TUI owns the terminal.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("launchdeck.log"))
}

pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
}
