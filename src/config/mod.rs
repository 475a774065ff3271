//! Configuration management module for push-notify
//!
//! Settings are read once, from environment variables (optionally layered
//! over a TOML file named by `NOTIFY_CONFIG_FILE`), and injected into the
//! notifier.

pub mod error;
pub mod loader;
pub mod mode;
pub mod settings;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_env;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use mode::NotifyMode;
pub use settings::{DingTalkConfig, GotifyConfig, LoggerSettings, NtfyConfig, Settings};
