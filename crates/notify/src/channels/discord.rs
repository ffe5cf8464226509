//! Discord webhook channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{iso_timestamp, WebhookChannel};
use crate::config::{Driver, ENV_DISCORD_WEBHOOK_URL};
use crate::error::ChannelError;

/// Required prefix for Discord webhook URLs.
pub const DISCORD_WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";

/// Message flag suppressing link-preview embeds.
const SUPPRESS_EMBEDS: u32 = 1 << 2;

/// Discord incoming-webhook channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordChannel;

#[async_trait]
impl WebhookChannel for DiscordChannel {
    fn driver(&self) -> Driver {
        Driver::Discord
    }

    fn url_env(&self) -> &'static str {
        ENV_DISCORD_WEBHOOK_URL
    }

    fn url_prefix(&self) -> &'static str {
        DISCORD_WEBHOOK_PREFIX
    }

    fn payload(&self, draft: &str) -> Result<serde_json::Value, ChannelError> {
        Ok(serde_json::to_value(DiscordPayload {
            content: draft,
            flags: SUPPRESS_EMBEDS,
        })?)
    }

    fn success_message(&self, delivered_at: &DateTime<Utc>) -> String {
        format!(
            "Success sending draft to Discord webhook at {}",
            iso_timestamp(delivered_at)
        )
    }

    fn failure_message(&self, detail: &str) -> String {
        format!("Failed to send draft to Discord webhook: {detail}")
    }
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
struct DiscordPayload<'a> {
    content: &'a str,
    flags: u32,
}
