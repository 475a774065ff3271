//! push-notify
//!
//! Sends a notification to one of Gotify, DingTalk or ntfy, chosen by the
//! `NOTIFY_MODE` environment variable.
//!
//! Sending is async and uses `reqwest`, so it must run inside a tokio runtime
//! supplied by the caller.
//!
//! ```ignore
//! use push_notify::Notifier;
//!
//! let notifier = Notifier::from_env()?;
//! let delivered = notifier.send("Backup finished", Some("Backup"), None).await;
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use config::{ConfigLoader, Settings};
pub use error::{NotifyError, NotifyResult};
pub use logger::init_logger;
pub use services::notifications::{NotificationMessage, Priority};
pub use services::Notifier;
