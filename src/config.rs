use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::transfer::TransferOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub spotify: Option<SpotifyConfig>,
    /// Where resolved identifiers are cached, `~/` is expanded
    #[serde(default)]
    pub cache_path: Option<String>,
    #[serde(default)]
    pub transfer: TransferConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferConfig {
    pub track_delay_ms: Option<u64>,
    /// 0 disables the limit
    pub time_budget_secs: Option<u64>,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("tuneshift").join("config.toml"))
    }

    /// Loads the given file, or the default location if it exists, or an empty config
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        if let Some(path) = &self.cache_path {
            return expand_path(path);
        }
        dirs::data_dir()
            .map(|dir| dir.join("tuneshift").join("cache.json"))
            .unwrap_or_else(|| PathBuf::from("cache.json"))
    }

    pub fn transfer_options(&self) -> TransferOptions {
        let defaults = TransferOptions::default();
        TransferOptions {
            track_delay: self
                .transfer
                .track_delay_ms
                .map_or(defaults.track_delay, Duration::from_millis),
            time_budget: match self.transfer.time_budget_secs {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.time_budget,
            },
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
