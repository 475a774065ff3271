use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while delivering a notification.
///
/// A non-success HTTP status is not an error here: providers report it as an
/// unsuccessful [`NotificationResult`](crate::services::notifications::NotificationResult)
/// so the response body can be logged alongside the status code.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// A configuration value the backend requires is absent or empty
    #[error("{backend}: required configuration {key} is not set")]
    MissingConfig {
        backend: &'static str,
        key: &'static str,
    },

    /// Priority could not be coerced to an integer
    #[error("Invalid priority '{value}': expected an integer")]
    InvalidPriority { value: String },

    /// `NOTIFY_MODE` names no known backend
    #[error("Unknown notify mode: {mode}")]
    UnsupportedMode { mode: String },

    /// A configuration value is present but malformed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection, TLS, timeout or request building failure
    #[error("{backend} request failed")]
    Transport {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl NotifyError {
    pub fn missing_config(backend: &'static str, key: &'static str) -> Self {
        NotifyError::MissingConfig { backend, key }
    }

    pub fn transport(backend: &'static str, source: reqwest::Error) -> Self {
        NotifyError::Transport { backend, source }
    }
}

/// Type alias for Result with NotifyError
pub type NotifyResult<T> = Result<T, NotifyError>;
