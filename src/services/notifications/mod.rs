//! Notification backends and the notifier that dispatches to them.
//!
//! `NotificationProvider` is implemented once per backend (Gotify,
//! DingTalk, ntfy); `Notifier` picks one from configuration.

mod dingtalk_provider;
mod gotify_provider;
mod notifier;
mod ntfy_provider;
mod provider;

#[cfg(test)]
pub(crate) mod mock_server;

pub use dingtalk_provider::DingTalkProvider;
pub use gotify_provider::{DEFAULT_PRIORITY, DEFAULT_TITLE, GotifyProvider};
pub use notifier::{Backend, Notifier};
pub use ntfy_provider::NtfyProvider;
pub use provider::{NotificationMessage, NotificationProvider, NotificationResult, Priority};
