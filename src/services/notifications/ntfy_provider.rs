//! ntfy notification provider implementation.
//!
//! Publishes the message body as plain text to `{url}/{topic}`, with title,
//! priority and access token passed as headers.
//!
//! ntfy API Reference: https://docs.ntfy.sh/publish/

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::NtfyConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::external::client::{HTTP_CLIENT, REQUEST_TIMEOUT};
use async_trait::async_trait;
use std::time::Instant;

const NAME: &str = "ntfy";

const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Headers and body of a publish request
#[derive(Debug, Clone, PartialEq, Eq)]
struct PublishRequest {
    headers: Vec<(&'static str, String)>,
    body: String,
}

#[cfg(test)]
impl PublishRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// ntfy provider
///
/// HTTP headers only carry ASCII reliably, so a title with any non-ASCII
/// character is moved into the first line of the body instead.
#[derive(Clone)]
pub struct NtfyProvider {
    config: NtfyConfig,
    client: reqwest::Client,
}

impl NtfyProvider {
    pub fn new(config: NtfyConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: NtfyConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> NotifyResult<(&str, &str)> {
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| NotifyError::missing_config(NAME, "NTFY_URL"))?;
        let topic = self
            .config
            .topic
            .as_deref()
            .ok_or_else(|| NotifyError::missing_config(NAME, "NTFY_TOPIC"))?;
        Ok((url, topic))
    }

    fn build_request(&self, message: &NotificationMessage) -> PublishRequest {
        let mut headers = vec![("Content-Type", CONTENT_TYPE.to_string())];
        let mut body = message.body.clone();

        match message.title() {
            Some(title) if title.is_ascii() => headers.push(("Title", title.to_string())),
            Some(title) => body = format!("{}\n{}", title, body),
            None => {}
        }

        // Forwarded as given; ntfy itself rejects unknown priorities.
        if let Some(priority) = message.priority() {
            headers.push(("Priority", priority.to_string()));
        }

        if let Some(token) = &self.config.token {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }

        PublishRequest { headers, body }
    }
}

#[async_trait]
impl NotificationProvider for NtfyProvider {
    /// Publishes a notification to the topic
    ///
    /// HTTP 200 and 201 count as delivered. A header value that is not a
    /// valid HTTP header fails the request before it is sent and is
    /// reported as a transport error.
    async fn send(&self, message: &NotificationMessage) -> NotifyResult<NotificationResult> {
        let (url, topic) = self.endpoint()?;
        let api_url = self.config.build_api_url(url, topic);
        let publish = self.build_request(message);

        let mut request = self.client.post(&api_url).timeout(REQUEST_TIMEOUT);
        for (name, value) in publish.headers {
            request = request.header(name, value);
        }

        let start = Instant::now();
        let response = request
            .body(publish.body)
            .send()
            .await
            .map_err(|e| NotifyError::transport(NAME, e))?;

        Ok(
            NotificationResult::from_response(response, start, |status| {
                status == 200 || status == 201
            })
            .await,
        )
    }

    fn name(&self) -> &'static str {
        NAME
    }

    async fn validate_config(&self) -> NotifyResult<()> {
        self.endpoint()?;
        self.config.validate()?;
        Ok(())
    }
}
