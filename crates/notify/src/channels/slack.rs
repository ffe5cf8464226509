//! Slack webhook channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{iso_timestamp, WebhookChannel};
use crate::config::{Driver, ENV_SLACK_WEBHOOK_URL};
use crate::error::ChannelError;

/// Required prefix for Slack incoming-webhook URLs.
pub const SLACK_WEBHOOK_PREFIX: &str = "https://hooks.slack.com/services/";

/// Slack incoming-webhook channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackChannel;

#[async_trait]
impl WebhookChannel for SlackChannel {
    fn driver(&self) -> Driver {
        Driver::Slack
    }

    fn url_env(&self) -> &'static str {
        ENV_SLACK_WEBHOOK_URL
    }

    fn url_prefix(&self) -> &'static str {
        SLACK_WEBHOOK_PREFIX
    }

    fn payload(&self, draft: &str) -> Result<serde_json::Value, ChannelError> {
        Ok(serde_json::to_value(SlackPayload { text: draft })?)
    }

    fn success_message(&self, delivered_at: &DateTime<Utc>) -> String {
        format!(
            "Success sending draft to webhook at {}",
            iso_timestamp(delivered_at)
        )
    }

    fn failure_message(&self, detail: &str) -> String {
        format!("Failed to send draft to Slack webhook: {detail}")
    }
}

// =============================================================================
// Slack API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}
