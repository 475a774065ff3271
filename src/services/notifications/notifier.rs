//! Notifier: the single entry point for sending notifications.
//!
//! The backend is chosen once, when the notifier is built. Every outcome of
//! a send (delivered, rejected, not attempted, failed in transit) is logged
//! and reduced to a `bool`; nothing is returned to the caller as an error.

use super::dingtalk_provider::DingTalkProvider;
use super::gotify_provider::GotifyProvider;
use super::ntfy_provider::NtfyProvider;
use super::provider::{NotificationMessage, NotificationProvider, NotificationResult, Priority};
use crate::config::{ConfigError, ConfigLoader, NotifyMode, Settings};
use crate::error::{NotifyError, NotifyResult};
use crate::external::client::HTTP_CLIENT;
use std::error::Error as _;

/// Backend selected by `NOTIFY_MODE`
#[derive(Clone)]
pub enum Backend {
    Gotify(GotifyProvider),
    DingTalk(DingTalkProvider),
    Ntfy(NtfyProvider),
    /// Mode named no known backend; every send fails without a request
    Unsupported(String),
}

impl Backend {
    fn from_settings(settings: Settings, client: reqwest::Client) -> Self {
        match settings.mode.parse::<NotifyMode>() {
            Ok(NotifyMode::Gotify) => {
                Backend::Gotify(GotifyProvider::with_client(settings.gotify, client))
            }
            Ok(NotifyMode::DingTalk) => {
                Backend::DingTalk(DingTalkProvider::with_client(settings.dingtalk, client))
            }
            Ok(NotifyMode::Ntfy) => Backend::Ntfy(NtfyProvider::with_client(settings.ntfy, client)),
            Err(_) => Backend::Unsupported(settings.mode),
        }
    }

    fn provider(&self) -> NotifyResult<&dyn NotificationProvider> {
        match self {
            Backend::Gotify(provider) => Ok(provider),
            Backend::DingTalk(provider) => Ok(provider),
            Backend::Ntfy(provider) => Ok(provider),
            Backend::Unsupported(mode) => Err(NotifyError::UnsupportedMode { mode: mode.clone() }),
        }
    }
}

/// Sends notifications through the configured backend
///
/// # Example
/// ```ignore
/// let notifier = Notifier::from_env()?;
/// if !notifier.send("Backup finished", Some("Backup"), None).await {
///     // already logged; nothing else to do
/// }
/// ```
#[derive(Clone)]
pub struct Notifier {
    backend: Backend,
}

impl Notifier {
    /// Builds a notifier from environment variables (`NOTIFY_MODE`, `GOTIFY_URL`, ...)
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = ConfigLoader::new().load()?;
        Ok(Self::new(settings))
    }

    /// Builds a notifier using the shared HTTP client
    pub fn new(settings: Settings) -> Self {
        Self::with_client(settings, HTTP_CLIENT.clone())
    }

    pub fn with_client(settings: Settings, client: reqwest::Client) -> Self {
        let backend = Backend::from_settings(settings, client);
        if let Backend::Unsupported(mode) = &backend {
            tracing::warn!(mode = %mode, "Unknown notify mode, notifications will not be sent");
        }
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Name of the selected backend, or the unrecognized mode
    pub fn mode(&self) -> &str {
        match &self.backend {
            Backend::Gotify(provider) => provider.name(),
            Backend::DingTalk(provider) => provider.name(),
            Backend::Ntfy(provider) => provider.name(),
            Backend::Unsupported(mode) => mode.as_str(),
        }
    }

    /// Sends `content` with an optional title and priority
    ///
    /// Returns `true` only when the backend accepted the message.
    pub async fn send(&self, content: &str, title: Option<&str>, priority: Option<Priority>) -> bool {
        let message = NotificationMessage {
            title: title.map(str::to_string),
            body: content.to_string(),
            priority,
        };
        self.send_message(&message).await
    }

    /// Like [`Notifier::send`], for a prepared message
    pub async fn send_message(&self, message: &NotificationMessage) -> bool {
        match self.try_send(message).await {
            Ok(result) if result.success => {
                tracing::info!(
                    backend = self.mode(),
                    status = result.status_code,
                    duration_ms = result.duration_ms,
                    "Notification sent"
                );
                true
            }
            Ok(result) => {
                tracing::warn!(
                    backend = self.mode(),
                    status = result.status_code,
                    response = %result.response,
                    "Notification rejected"
                );
                false
            }
            Err(e) => {
                log_failure(&e);
                false
            }
        }
    }

    /// Sends without logging, returning the detailed outcome
    pub async fn try_send(&self, message: &NotificationMessage) -> NotifyResult<NotificationResult> {
        self.backend.provider()?.send(message).await
    }

    /// Checks that the selected backend has everything it needs
    pub async fn validate(&self) -> NotifyResult<()> {
        self.backend.provider()?.validate_config().await
    }
}

fn log_failure(error: &NotifyError) {
    match error {
        NotifyError::UnsupportedMode { mode } => {
            tracing::error!(mode = %mode, "Unknown notify mode");
        }
        NotifyError::MissingConfig { backend, key } => {
            tracing::error!(backend, key, "Notification not sent: configuration missing");
        }
        NotifyError::InvalidPriority { value } => {
            tracing::error!(priority = %value, "Notification not sent: priority is not an integer");
        }
        NotifyError::Config(source) => {
            tracing::error!(error = %source, "Notification not sent: invalid configuration");
        }
        NotifyError::Transport { backend, source } => {
            let cause = source.source().map(ToString::to_string).unwrap_or_default();
            tracing::error!(backend, error = %source, cause = %cause, "Notification request failed");
        }
    }
}
