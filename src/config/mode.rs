//! Backend selector read from `NOTIFY_MODE`

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Notification backend selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Self-hosted Gotify server
    Gotify,
    /// DingTalk robot webhook
    DingTalk,
    /// ntfy server (ntfy.sh or self-hosted)
    #[default]
    Ntfy,
}

impl NotifyMode {
    /// Convert the mode to a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyMode::Gotify => "gotify",
            NotifyMode::DingTalk => "dingtalk",
            NotifyMode::Ntfy => "ntfy",
        }
    }
}

/// Matching is exact: `Gotify` or ` ntfy` are unknown modes.
impl FromStr for NotifyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gotify" => Ok(NotifyMode::Gotify),
            "dingtalk" => Ok(NotifyMode::DingTalk),
            "ntfy" => Ok(NotifyMode::Ntfy),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for NotifyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
