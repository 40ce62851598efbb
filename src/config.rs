use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory where the contact snapshot and event report are written
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Contact snapshot path; defaults to `<data_dir>/contacts.csv`
    #[serde(default)]
    pub contacts_file: Option<String>,

    /// Event report path; defaults to `<data_dir>/events.csv`
    #[serde(default)]
    pub events_file: Option<String>,

    /// Log filter used when no verbosity flag is passed (env_logger syntax)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            contacts_file: None,
            events_file: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    pub fn contacts_path(&self) -> PathBuf {
        match &self.contacts_file {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.data_dir).join("contacts.csv"),
        }
    }

    pub fn events_path(&self) -> PathBuf {
        match &self.events_file {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.data_dir).join("events.csv"),
        }
    }
}

/// Get the config file path (~/.config/calroster/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("calroster");
    Ok(config_dir.join("config.toml"))
}

/// Load config from ~/.config/calroster/config.toml, falling back to
/// defaults when the file doesn't exist.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}
