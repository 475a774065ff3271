//! Configuration loader for push-notify
//!
//! This module provides the `ConfigLoader` struct that builds [`Settings`]
//! from the process environment, optionally layered over a TOML file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};

use crate::config::error::ConfigError;
use crate::config::settings::{FlatSettings, Settings};

/// Environment variable for an optional TOML configuration file
const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

/// Every variable the loader reads from the process environment
const ENV_KEYS: &[&str] = &[
    CONFIG_FILE_ENV,
    "NOTIFY_MODE",
    "GOTIFY_URL",
    "GOTIFY_TOKEN",
    "GOTIFY_TITLE",
    "GOTIFY_PRIORITY",
    "DINGTALK_WEBHOOK",
    "NTFY_URL",
    "NTFY_TOPIC",
    "NTFY_TOKEN",
    "NOTIFY_LOG_LEVEL",
    "NOTIFY_LOG_FORMAT",
];

/// Configuration loader
///
/// Sources, lowest priority first:
/// 1. the file named by `NOTIFY_CONFIG_FILE` (optional, flat keys such as `ntfy_topic = "alerts"`)
/// 2. environment variables (`NTFY_TOPIC=alerts`)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Specific configuration file path
    config_file: Option<PathBuf>,
    /// Variables fed to the environment source
    source: Map<String, String>,
}

impl ConfigLoader {
    /// Create a loader that reads the process environment
    ///
    /// Only this crate's own variables are read; a variable that is unset
    /// or not valid Unicode counts as absent.
    pub fn new() -> Self {
        let source = ENV_KEYS
            .iter()
            .filter_map(|key| {
                std::env::var(key)
                    .ok()
                    .map(|value| (key.to_string(), value))
            })
            .collect();

        Self::with_source(source)
    }

    /// Create a loader that reads the given variables instead of the process environment
    ///
    /// Keys are environment variable names (`GOTIFY_URL`, ...).
    pub fn with_source(source: Map<String, String>) -> Self {
        let config_file = source
            .get(CONFIG_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            config_file,
            source,
        }
    }

    /// Get the configuration file path, if one is set
    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Load settings from all sources
    ///
    /// Values are not validated here; missing backend parameters only matter
    /// to the backend that is selected. Call [`Settings::validate`] to check
    /// URLs and logger options up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is missing or cannot be parsed.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let flat: FlatSettings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        Ok(Settings::from(flat))
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file)?,
            None => builder,
        };

        let builder = self.add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Add the configuration file to the config builder
    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(true),
        ))
    }

    /// Add environment variable source to the config builder
    ///
    /// Variables are not prefixed and keys are lowercased:
    /// `GOTIFY_URL` -> `gotify_url`. Values are kept as strings so tokens
    /// that look numeric are not reinterpreted.
    fn add_env_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::default()
                .ignore_empty(true)
                .try_parsing(false)
                .source(Some(self.source.clone())),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
