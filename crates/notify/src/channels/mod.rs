//! Webhook channel implementations.

pub mod discord;
pub mod slack;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::config::{Driver, NotificationConfig};
use crate::error::{ChannelError, ConfigError};

/// A webhook destination (Discord, Slack).
///
/// Implementors describe the destination; the shared POST lives in
/// [`WebhookChannel::send`].
#[async_trait]
pub trait WebhookChannel: Send + Sync {
    /// The driver this channel serves.
    fn driver(&self) -> Driver;

    /// Environment variable holding this channel's webhook URL.
    fn url_env(&self) -> &'static str;

    /// Literal prefix every valid webhook URL must start with.
    fn url_prefix(&self) -> &'static str;

    /// Build the JSON body for a draft.
    fn payload(&self, draft: &str) -> Result<serde_json::Value, ChannelError>;

    /// Status line reported after a successful post.
    fn success_message(&self, delivered_at: &DateTime<Utc>) -> String;

    /// Status line reported after a failed post.
    fn failure_message(&self, detail: &str) -> String;

    /// Get the name of this channel.
    fn name(&self) -> &'static str {
        self.driver().as_str()
    }

    /// Look up and validate the webhook URL for this channel.
    fn webhook_url<'a>(&self, config: &'a NotificationConfig) -> Result<&'a str, ConfigError> {
        let url = config
            .webhook_url(self.driver())
            .ok_or(ConfigError::WebhookUrlMissing {
                var: self.url_env(),
            })?;

        if !url.starts_with(self.url_prefix()) {
            return Err(ConfigError::InvalidWebhookUrl {
                driver: self.driver(),
                expected: self.url_prefix(),
                url: url.to_string(),
            });
        }

        Ok(url)
    }

    /// POST a draft to `webhook_url`.
    ///
    /// Any 2xx response counts as delivered; the body is not inspected.
    async fn send(
        &self,
        client: &reqwest::Client,
        webhook_url: &str,
        draft: &str,
        timeout: Option<Duration>,
    ) -> Result<(), ChannelError> {
        let payload = self.payload(draft)?;

        debug!(channel = self.name(), draft_len = draft.len(), "Sending draft");

        let mut request = client.post(webhook_url).json(&payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        if response.status().is_success() {
            debug!(
                channel = self.name(),
                status = %response.status(),
                "Draft accepted by webhook"
            );
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ChannelError::Status { status, body })
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
pub(crate) fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
