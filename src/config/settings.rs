//! Configuration settings structures for push-notify
//!
//! Variables arrive flat (`GOTIFY_URL`, `NTFY_TOPIC`, ...) and are grouped
//! here into one section per backend. Connection parameters stay optional:
//! a missing value is reported when a notification is sent, not at load time.

use serde::{Deserialize, Serialize};

use crate::logger::{LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_mode() -> String {
    "ntfy".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

/// Empty strings count as unset, so `GOTIFY_URL=""` behaves like no `GOTIFY_URL`.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// Backend Configuration
// ============================================================================

/// Gotify connection parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GotifyConfig {
    /// Server base URL (`GOTIFY_URL`)
    pub url: Option<String>,
    /// Application token (`GOTIFY_TOKEN`)
    pub token: Option<String>,
    /// Title used when a message has none (`GOTIFY_TITLE`)
    pub title: Option<String>,
    /// Priority used when a message has none (`GOTIFY_PRIORITY`), coerced at send time
    pub priority: Option<String>,
}

impl GotifyConfig {
    /// Message endpoint: base URL without trailing slashes, then `/message?token=...`
    pub fn build_api_url(&self, url: &str, token: &str) -> String {
        format!("{}/message?token={}", url.trim_end_matches('/'), token)
    }
}

/// DingTalk robot parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingTalkConfig {
    /// Robot webhook URL (`DINGTALK_WEBHOOK`)
    pub webhook: Option<String>,
}

/// ntfy connection parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtfyConfig {
    /// Server base URL (`NTFY_URL`), e.g. https://ntfy.sh
    pub url: Option<String>,
    /// Topic to publish to (`NTFY_TOPIC`)
    pub topic: Option<String>,
    /// Access token sent as a bearer token (`NTFY_TOKEN`)
    pub token: Option<String>,
}

impl NtfyConfig {
    /// Publish endpoint: base URL without trailing slashes, then `/{topic}`
    pub fn build_api_url(&self, url: &str, topic: &str) -> String {
        format!("{}/{}", url.trim_end_matches('/'), topic)
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Logger settings (`NOTIFY_LOG_LEVEL`, `NOTIFY_LOG_FORMAT`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggerSettings {
    /// Convert to the logger module's configuration
    ///
    /// Fails on an unknown level or format.
    pub fn to_logger_config(&self) -> anyhow::Result<LoggerConfig> {
        let format: LogFormat = self.format.parse()?;
        LoggerConfig::new(self.level.clone(), format, true)
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Complete notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Raw `NOTIFY_MODE` value; parsed into a backend when the notifier is built
    pub mode: String,
    pub gotify: GotifyConfig,
    pub dingtalk: DingTalkConfig,
    pub ntfy: NtfyConfig,
    pub logger: LoggerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            gotify: GotifyConfig::default(),
            dingtalk: DingTalkConfig::default(),
            ntfy: NtfyConfig::default(),
            logger: LoggerSettings::default(),
        }
    }
}

impl Settings {
    /// Installs the global logger from `NOTIFY_LOG_LEVEL` / `NOTIFY_LOG_FORMAT`
    pub fn init_logger(&self) -> anyhow::Result<()> {
        crate::logger::init_logger(self.logger.to_logger_config()?)
    }
}

/// Flat key set as produced by the environment source (keys lowercased).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FlatSettings {
    notify_mode: Option<String>,
    gotify_url: Option<String>,
    gotify_token: Option<String>,
    gotify_title: Option<String>,
    gotify_priority: Option<String>,
    dingtalk_webhook: Option<String>,
    ntfy_url: Option<String>,
    ntfy_topic: Option<String>,
    ntfy_token: Option<String>,
    notify_log_level: Option<String>,
    notify_log_format: Option<String>,
}

impl From<FlatSettings> for Settings {
    fn from(flat: FlatSettings) -> Self {
        Self {
            mode: non_empty(flat.notify_mode).unwrap_or_else(default_mode),
            gotify: GotifyConfig {
                url: non_empty(flat.gotify_url),
                token: non_empty(flat.gotify_token),
                title: non_empty(flat.gotify_title),
                priority: non_empty(flat.gotify_priority),
            },
            dingtalk: DingTalkConfig {
                webhook: non_empty(flat.dingtalk_webhook),
            },
            ntfy: NtfyConfig {
                url: non_empty(flat.ntfy_url),
                topic: non_empty(flat.ntfy_topic),
                token: non_empty(flat.ntfy_token),
            },
            logger: LoggerSettings {
                level: non_empty(flat.notify_log_level).unwrap_or_else(default_log_level),
                format: non_empty(flat.notify_log_format).unwrap_or_else(default_log_format),
            },
        }
    }
}
