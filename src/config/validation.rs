//! Configuration validation logic
//!
//! Checks values that are present. Absent backend parameters are not an
//! error here: they only fail the sends that need them.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    DingTalkConfig, GotifyConfig, LoggerSettings, NtfyConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Check that `value` is an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|_| {
        ConfigError::validation(field.to_string(), format!("Invalid URL format: {}", value))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::validation(
            field,
            "URL must use http or https protocol",
        ));
    }

    Ok(())
}

impl GotifyConfig {
    /// Validate Gotify configuration
    ///
    /// # Validation Rules
    /// - URL, when set, must be an http(s) URL
    /// - Priority, when set, must be an integer
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            validate_http_url("GOTIFY_URL", url)?;
        }

        if let Some(priority) = &self.priority {
            if priority.trim().parse::<i64>().is_err() {
                return Err(ConfigError::validation(
                    "GOTIFY_PRIORITY".to_string(),
                    format!("Priority must be an integer, got '{}'", priority),
                ));
            }
        }

        Ok(())
    }
}

impl DingTalkConfig {
    /// Validate DingTalk configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(webhook) = &self.webhook {
            validate_http_url("DINGTALK_WEBHOOK", webhook)?;
        }
        Ok(())
    }
}

impl NtfyConfig {
    /// Validate ntfy configuration
    ///
    /// # Validation Rules
    /// - URL, when set, must be an http(s) URL
    /// - Topic, when set, must not contain `/`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            validate_http_url("NTFY_URL", url)?;
        }

        if let Some(topic) = &self.topic {
            if topic.contains('/') {
                return Err(ConfigError::validation(
                    "NTFY_TOPIC",
                    "Topic must be a single path segment",
                ));
            }
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "NOTIFY_LOG_LEVEL".to_string(),
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        let format = self.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::validation(
                "NOTIFY_LOG_FORMAT".to_string(),
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all settings
    ///
    /// The mode itself is not checked: an unknown mode is reported on each send.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gotify.validate()?;
        self.dingtalk.validate()?;
        self.ntfy.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
