//! Core notification provider trait and types.
//!
//! Every backend (Gotify, DingTalk, ntfy) implements [`NotificationProvider`]
//! and receives the same [`NotificationMessage`].

use crate::error::{NotifyError, NotifyResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Message priority, as given by the caller
///
/// Backends interpret it differently: Gotify needs an integer, ntfy forwards
/// the text as-is in its `Priority` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Number(i64),
    Text(String),
}

impl Priority {
    /// Whether the priority counts as given; `0` and `""` mean "use the default"
    pub fn is_set(&self) -> bool {
        match self {
            Priority::Number(n) => *n != 0,
            Priority::Text(s) => !s.is_empty(),
        }
    }

    /// Coerces the priority to an integer, accepting surrounding whitespace
    pub fn as_integer(&self) -> NotifyResult<i64> {
        match self {
            Priority::Number(n) => Ok(*n),
            Priority::Text(s) => s.trim().parse().map_err(|_| NotifyError::InvalidPriority {
                value: s.clone(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Number(n) => write!(f, "{}", n),
            Priority::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Priority::Number(value)
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Priority::Text(value.to_string())
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::Text(value)
    }
}

/// Message to be sent via notification provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title (optional; empty counts as absent)
    pub title: Option<String>,
    /// Message body/content (required)
    pub body: String,
    /// Message priority (optional; see [`Priority::is_set`])
    pub priority: Option<Priority>,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// The title, if one was given and is not empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// The priority, if one was given and is set
    pub fn priority(&self) -> Option<&Priority> {
        self.priority.as_ref().filter(|p| p.is_set())
    }
}

/// Outcome of a request that reached the server
///
/// Transport failures never produce a result; they surface as
/// [`NotifyError::Transport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether the backend accepted the message
    pub success: bool,
    /// HTTP status code
    pub status_code: u16,
    /// Response body
    pub response: String,
    /// Time taken for the request in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// Reads the response, judging success with the backend's own status rule
    pub(crate) async fn from_response(
        response: reqwest::Response,
        start: Instant,
        accepted: fn(u16) -> bool,
    ) -> Self {
        let status_code = response.status().as_u16();
        let response_text = response.text().await.unwrap_or_default();

        Self {
            success: accepted(status_code),
            status_code,
            response: response_text,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Trait for notification backends
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    ///
    /// # Returns
    /// - `Ok` with the status and body of whatever response came back
    /// - `Err(MissingConfig)` before any request when a required value is absent
    /// - `Err(Transport)` when no response was received
    async fn send(&self, message: &NotificationMessage) -> NotifyResult<NotificationResult>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> NotifyResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_is_set() {
        assert!(Priority::from(5).is_set());
        assert!(Priority::from("high").is_set());
        assert!(!Priority::from(0).is_set());
        assert!(!Priority::from("").is_set());
    }

    #[test]
    fn test_priority_as_integer() {
        assert_eq!(Priority::from(7).as_integer().unwrap(), 7);
        assert_eq!(Priority::from(" 4 ").as_integer().unwrap(), 4);
        assert!(matches!(
            Priority::from("urgent").as_integer(),
            Err(NotifyError::InvalidPriority { value }) if value == "urgent"
        ));
    }

    #[test]
    fn test_priority_display_is_unmodified() {
        assert_eq!(Priority::from(9).to_string(), "9");
        assert_eq!(Priority::from("urgent").to_string(), "urgent");
        assert_eq!(Priority::from(" 4 ").to_string(), " 4 ");
    }

    #[test]
    fn test_priority_deserialize_untagged() {
        let p: Priority = serde_json::from_str("5").unwrap();
        assert_eq!(p, Priority::Number(5));
        let p: Priority = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(p, Priority::Text("max".to_string()));
    }

    #[test]
    fn test_message_accessors_ignore_empty_values() {
        let message = NotificationMessage::new("body")
            .with_title("")
            .with_priority(0);
        assert_eq!(message.title(), None);
        assert_eq!(message.priority(), None);

        let message = NotificationMessage::new("body")
            .with_title("Alert")
            .with_priority("high");
        assert_eq!(message.title(), Some("Alert"));
        assert_eq!(message.priority(), Some(&Priority::from("high")));
    }
}
