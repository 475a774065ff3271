//! Gotify notification provider implementation.
//!
//! Posts a JSON message to `{url}/message?token={token}`.
//!
//! Gotify API Reference: https://gotify.net/docs/pushmsg

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult, Priority};
use crate::config::GotifyConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::external::client::{HTTP_CLIENT, REQUEST_TIMEOUT};
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

const NAME: &str = "gotify";

/// Title used when neither the message nor `GOTIFY_TITLE` provides one
pub const DEFAULT_TITLE: &str = "通知";

/// Priority used when neither the message nor `GOTIFY_PRIORITY` provides one
pub const DEFAULT_PRIORITY: i64 = 3;

/// Gotify notification provider
///
/// # Example
/// ```ignore
/// let config = GotifyConfig {
///     url: Some("https://gotify.example.com".to_string()),
///     token: Some("AbCdEf123".to_string()),
///     title: None,
///     priority: None,
/// };
/// let provider = GotifyProvider::new(config);
/// let result = provider.send(&NotificationMessage::new("disk almost full")).await?;
/// ```
#[derive(Clone)]
pub struct GotifyProvider {
    config: GotifyConfig,
    client: reqwest::Client,
}

impl GotifyProvider {
    /// Creates a new gotify provider using the shared HTTP client
    pub fn new(config: GotifyConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: GotifyConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Returns `(url, token)` or the first one missing
    fn endpoint(&self) -> NotifyResult<(&str, &str)> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| NotifyError::missing_config(NAME, "GOTIFY_URL"))?;
        let token = self
            .config
            .token
            .as_deref()
            .ok_or_else(|| NotifyError::missing_config(NAME, "GOTIFY_TOKEN"))?;
        Ok((url, token))
    }

    /// Priority from the message, else `GOTIFY_PRIORITY`, else 3, as an integer
    fn resolve_priority(&self, message: &NotificationMessage) -> NotifyResult<i64> {
        match (message.priority(), &self.config.priority) {
            (Some(priority), _) => priority.as_integer(),
            (None, Some(configured)) => Priority::Text(configured.clone()).as_integer(),
            (None, None) => Ok(DEFAULT_PRIORITY),
        }
    }

    /// Builds the `{title, message, priority}` body
    fn build_request_body(&self, message: &NotificationMessage) -> NotifyResult<serde_json::Value> {
        let title = message
            .title()
            .or(self.config.title.as_deref())
            .unwrap_or(DEFAULT_TITLE);

        Ok(json!({
            "title": title,
            "message": message.body,
            "priority": self.resolve_priority(message)?,
        }))
    }
}

#[async_trait]
impl NotificationProvider for GotifyProvider {
    /// Sends a notification via Gotify
    ///
    /// Only HTTP 200 counts as delivered.
    async fn send(&self, message: &NotificationMessage) -> NotifyResult<NotificationResult> {
        let (url, token) = self.endpoint()?;
        let request_body = self.build_request_body(message)?;
        let api_url = self.config.build_api_url(url, token);

        let start = Instant::now();
        let response = self
            .client
            .post(&api_url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| NotifyError::transport(NAME, e))?;

        Ok(NotificationResult::from_response(response, start, |status| status == 200).await)
    }

    fn name(&self) -> &'static str {
        NAME
    }

    /// Checks that url and token are set and well formed
    async fn validate_config(&self) -> NotifyResult<()> {
        self.endpoint()?;
        self.config.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::mock_server::{MockServer, test_client, unreachable_url};

    fn config(url: Option<String>) -> GotifyConfig {
        GotifyConfig {
            url,
            token: Some("AbCdEf123".to_string()),
            title: None,
            priority: None,
        }
    }

    #[test]
    fn test_build_request_body_defaults() {
        let provider = GotifyProvider::new(config(None));

        let body = provider
            .build_request_body(&NotificationMessage::new("Backup finished"))
            .unwrap();
        assert_eq!(
            body,
            json!({"title": "通知", "message": "Backup finished", "priority": 3})
        );
    }

    #[test]
    fn test_build_request_body_configured_defaults() {
        let mut config = config(None);
        config.title = Some("Server".to_string());
        config.priority = Some("6".to_string());
        let provider = GotifyProvider::new(config);

        let body = provider
            .build_request_body(&NotificationMessage::new("Backup finished"))
            .unwrap();
        assert_eq!(
            body,
            json!({"title": "Server", "message": "Backup finished", "priority": 6})
        );
    }

    #[test]
    fn test_build_request_body_message_overrides() {
        let mut config = config(None);
        config.title = Some("Server".to_string());
        config.priority = Some("6".to_string());
        let provider = GotifyProvider::new(config);

        let message = NotificationMessage::new("Backup failed")
            .with_title("Backup")
            .with_priority("8");
        let body = provider.build_request_body(&message).unwrap();
        assert_eq!(
            body,
            json!({"title": "Backup", "message": "Backup failed", "priority": 8})
        );
    }

    #[test]
    fn test_zero_priority_falls_back_to_default() {
        let provider = GotifyProvider::new(config(None));

        let message = NotificationMessage::new("x").with_priority(0);
        let body = provider.build_request_body(&message).unwrap();
        assert_eq!(body["priority"], 3);
    }

    #[test]
    fn test_non_integer_priority_is_rejected() {
        let provider = GotifyProvider::new(config(None));

        let message = NotificationMessage::new("x").with_priority("high");
        assert!(matches!(
            provider.build_request_body(&message),
            Err(NotifyError::InvalidPriority { .. })
        ));
    }

    #[tokio::test]
    async fn test_send_posts_to_message_endpoint() {
        let server = MockServer::ok().await;
        let provider =
            GotifyProvider::with_client(config(Some(format!("{}/", server.url()))), test_client());

        let result = provider
            .send(&NotificationMessage::new("hello").with_priority(5))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.status_code, 200);

        let request = server.only_request();
        assert_eq!(request.method, "POST");
        assert_eq!(request.uri.path(), "/message");
        assert_eq!(request.uri.query(), Some("token=AbCdEf123"));
        assert_eq!(
            request.json(),
            json!({"title": "通知", "message": "hello", "priority": 5})
        );
    }

    #[tokio::test]
    async fn test_send_non_200_is_unsuccessful() {
        let server = MockServer::start(401, r#"{"error":"Unauthorized"}"#).await;
        let provider = GotifyProvider::with_client(config(Some(server.url())), test_client());

        let result = provider.send(&NotificationMessage::new("hello")).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.status_code, 401);
        assert!(result.response.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_send_201_is_unsuccessful() {
        let server = MockServer::start(201, "").await;
        let provider = GotifyProvider::with_client(config(Some(server.url())), test_client());

        let result = provider.send(&NotificationMessage::new("hello")).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_send_missing_token_makes_no_request() {
        let server = MockServer::ok().await;
        let mut config = config(Some(server.url()));
        config.token = None;
        let provider = GotifyProvider::with_client(config, test_client());

        let err = provider.send(&NotificationMessage::new("hello")).await.unwrap_err();
        assert!(matches!(
            err,
            NotifyError::MissingConfig { key: "GOTIFY_TOKEN", .. }
        ));
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_send_invalid_priority_makes_no_request() {
        let server = MockServer::ok().await;
        let provider = GotifyProvider::with_client(config(Some(server.url())), test_client());

        let message = NotificationMessage::new("hello").with_priority("urgent");
        assert!(provider.send(&message).await.is_err());
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        let provider =
            GotifyProvider::with_client(config(Some(unreachable_url().await)), test_client());

        let err = provider.send(&NotificationMessage::new("hello")).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport { backend: "gotify", .. }));
    }

    #[tokio::test]
    async fn test_validate_config() {
        let provider = GotifyProvider::new(config(Some("https://gotify.example.com".to_string())));
        assert!(provider.validate_config().await.is_ok());

        let provider = GotifyProvider::new(config(None));
        assert!(provider.validate_config().await.is_err());

        let provider = GotifyProvider::new(config(Some("gotify.example.com".to_string())));
        assert!(matches!(
            provider.validate_config().await,
            Err(NotifyError::Config(_))
        ));
    }
}
