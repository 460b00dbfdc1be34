//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "monitor.redraw_interval_ms")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "monitor.redraw_interval_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, _quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["monitor", "redraw_interval_ms"] => Ok(config.monitor.redraw_interval_ms.to_string()),
        ["monitor", "sample_poll_ms"] => Ok(config.monitor.sample_poll_ms.to_string()),
        ["store", "db_path"] => Ok(config
            .store
            .db_path
            .clone()
            .unwrap_or_else(|| "<not set>".to_string())),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    println!("Set {} = {}", key, value);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["monitor", "redraw_interval_ms"] => {
            config.monitor.redraw_interval_ms = value.parse()?;
        }
        ["monitor", "sample_poll_ms"] => {
            config.monitor.sample_poll_ms = value.parse()?;
        }
        ["store", "db_path"] => {
            config.store.db_path = Some(value.to_string());
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();

        assert_eq!(
            get_config_value(&config, "monitor.redraw_interval_ms").unwrap(),
            "1250"
        );
        assert_eq!(
            get_config_value(&config, "store.db_path").unwrap(),
            "<not set>"
        );
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let config = Config::default();
        assert!(get_config_value(&config, "monitor.bogus").is_err());
    }

    #[test]
    fn test_set_parses_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "monitor.redraw_interval_ms", "600").unwrap();
        assert_eq!(config.monitor.redraw_interval_ms, 600);

        set_config_value(&mut config, "store.db_path", "/tmp/x.db").unwrap();
        assert_eq!(config.store.db_path.as_deref(), Some("/tmp/x.db"));

        assert!(set_config_value(&mut config, "monitor.redraw_interval_ms", "fast").is_err());
        assert!(set_config_value(&mut config, "nope", "1").is_err());
    }
}
