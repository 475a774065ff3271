//! DingTalk robot notification provider implementation.
//!
//! Posts a `text` message to a custom robot webhook.

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::DingTalkConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::external::client::{HTTP_CLIENT, REQUEST_TIMEOUT};
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

const NAME: &str = "dingtalk";

/// DingTalk robot provider
///
/// DingTalk has no title field; a title is written as the first line of the text.
#[derive(Clone)]
pub struct DingTalkProvider {
    config: DingTalkConfig,
    client: reqwest::Client,
}

impl DingTalkProvider {
    pub fn new(config: DingTalkConfig) -> Self {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    pub fn with_client(config: DingTalkConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn webhook(&self) -> NotifyResult<&str> {
        self.config
            .webhook
            .as_deref()
            .ok_or_else(|| NotifyError::missing_config(NAME, "DINGTALK_WEBHOOK"))
    }

    fn build_request_body(&self, message: &NotificationMessage) -> serde_json::Value {
        let content = match message.title() {
            Some(title) => format!("{}\n{}", title, message.body),
            None => message.body.clone(),
        };

        json!({
            "msgtype": "text",
            "text": { "content": content },
        })
    }
}

#[async_trait]
impl NotificationProvider for DingTalkProvider {
    /// Sends a notification via the robot webhook
    ///
    /// Only HTTP 200 counts as delivered. Priority is not supported and ignored.
    async fn send(&self, message: &NotificationMessage) -> NotifyResult<NotificationResult> {
        let webhook = self.webhook()?;
        let request_body = self.build_request_body(message);

        let start = Instant::now();
        let response = self
            .client
            .post(webhook)
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

    async fn validate_config(&self) -> NotifyResult<()> {
        self.webhook()?;
        self.config.validate()?;
        Ok(())
    }
}
