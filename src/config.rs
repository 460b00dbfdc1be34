use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::LogStore;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Monitor cadence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Indicator redraw interval in milliseconds
    #[serde(default = "default_redraw_interval_ms")]
    pub redraw_interval_ms: u64,
    /// Battery poll interval in milliseconds
    #[serde(default = "default_sample_poll_ms")]
    pub sample_poll_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: default_redraw_interval_ms(),
            sample_poll_ms: default_sample_poll_ms(),
        }
    }
}

fn default_redraw_interval_ms() -> u64 {
    1250
}

fn default_sample_poll_ms() -> u64 {
    2000
}

/// Log store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path; defaults to the per-user data directory
    #[serde(default)]
    pub db_path: Option<String>,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "battrack", "Battrack")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Resolved log database path: explicit override or per-user default
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.store.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => LogStore::default_path(),
        }
    }
}
