//! Draft delivery to Slack or Discord incoming webhooks.
//!
//! A draft post is routed to exactly one webhook, chosen by configuration.
//! Misconfiguration is returned as a [`ConfigError`] before anything is sent;
//! delivery problems come back as a [`DeliveryResult::Failure`].
//!
//! # Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), draft_notify::ConfigError> {
//! use draft_notify::{NotificationConfig, Notifier};
//!
//! let config = NotificationConfig {
//!     driver: Some("discord".to_string()),
//!     discord_webhook_url: Some("https://discord.com/api/webhooks/123/token".to_string()),
//!     ..Default::default()
//! };
//!
//! let result = Notifier::new().send_draft(&config, "hello world").await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`send_draft`] reads these environment variables on every call. A local
//! `.env` file is loaded once per process, before the first read:
//!
//! - `NOTIFICATION_DRIVER`: `slack` or `discord` (case-insensitive)
//! - `DISCORD_WEBHOOK_URL`: must start with `https://discord.com/api/webhooks/`
//! - `SLACK_WEBHOOK_URL`: must start with `https://hooks.slack.com/services/`
//! - `NOTIFICATION_TIMEOUT_SECS`: optional per-request timeout
//!
//! # Architecture
//!
//! - [`WebhookChannel`] describes a destination: URL prefix, payload, status lines
//! - [`DiscordChannel`] and [`SlackChannel`] implement it
//! - [`Notifier`] validates configuration and performs the single POST

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod config;
pub mod delivery;
pub mod error;

pub use channels::discord::DiscordChannel;
pub use channels::slack::SlackChannel;
pub use channels::WebhookChannel;
pub use config::{Driver, NotificationConfig};
pub use delivery::DeliveryResult;
pub use error::{ChannelError, ConfigError};

use std::time::Duration;
use tracing::{error, info};

/// Sends draft posts to the configured webhook.
///
/// Holds only an HTTP client; configuration is supplied per call, so a single
/// `Notifier` can serve concurrent sends.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    client: reqwest::Client,
}

impl Notifier {
    /// Create a notifier with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a notifier using a specific HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Validate `config` and post `draft` to the selected webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the driver is missing or unsupported, or
    /// the driver's webhook URL is missing or malformed. No request is made in
    /// that case. Transport failures are not errors; they are reported as
    /// [`DeliveryResult::Failure`].
    pub async fn send_draft(
        &self,
        config: &NotificationConfig,
        draft: &str,
    ) -> Result<DeliveryResult, ConfigError> {
        let driver = config.driver()?;
        let webhook_url = driver.channel().webhook_url(config)?;

        Ok(self
            .deliver(driver, webhook_url, draft, config.request_timeout)
            .await)
    }

    /// Post to an already validated webhook URL and fold the outcome into a
    /// [`DeliveryResult`].
    async fn deliver(
        &self,
        driver: Driver,
        webhook_url: &str,
        draft: &str,
        timeout: Option<Duration>,
    ) -> DeliveryResult {
        let channel = driver.channel();

        match channel.send(&self.client, webhook_url, draft, timeout).await {
            Ok(()) => {
                info!(channel = channel.name(), "Draft sent");
                DeliveryResult::success(driver)
            }
            Err(e) => {
                let detail = error::error_chain(&e);
                error!(
                    channel = channel.name(),
                    error = %detail,
                    "Error sending draft. Please check {}",
                    channel.url_env()
                );
                DeliveryResult::Failure { driver, detail }
            }
        }
    }
}

/// Send a draft using configuration read from the environment.
///
/// Loads `.env` on the first call if present, then reads the `NOTIFICATION_*`
/// and webhook variables fresh, so changes made before each call (including
/// removals) are honored.
///
/// # Errors
///
/// Returns [`ConfigError`] on invalid configuration; see
/// [`Notifier::send_draft`].
pub async fn send_draft(draft: &str) -> Result<DeliveryResult, ConfigError> {
    config::load_dotenv();
    let config = NotificationConfig::from_env()?;
    Notifier::new().send_draft(&config, draft).await
}
