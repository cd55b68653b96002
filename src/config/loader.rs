use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::StoreConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl StoreConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/ducks/store.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("ducks").join("store.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `StoreConfig::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(StoreConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: StoreConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The task channel can hold at least one action
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task_channel_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "task_channel_capacity must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
