//! send-draft - deliver a draft post to the configured Slack or Discord webhook.
//!
//! # Environment Variables
//!
//! - `NOTIFICATION_DRIVER` - `slack` or `discord` (or pass via --driver)
//! - `DISCORD_WEBHOOK_URL` - Discord webhook URL (or --discord-webhook-url)
//! - `SLACK_WEBHOOK_URL` - Slack webhook URL (or --slack-webhook-url)
//! - `NOTIFICATION_TIMEOUT_SECS` - optional request timeout (or --timeout-secs)
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Examples
//!
//! ```bash
//! send-draft "New post is ready for review"
//! generate-post | send-draft --driver slack -
//! ```

use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use draft_notify::config::{
    ENV_DISCORD_WEBHOOK_URL, ENV_NOTIFICATION_DRIVER, ENV_NOTIFICATION_TIMEOUT_SECS,
    ENV_SLACK_WEBHOOK_URL,
};
use draft_notify::{NotificationConfig, Notifier};

/// Deliver a draft post to a Slack or Discord incoming webhook.
#[derive(Parser)]
#[command(name = "send-draft")]
#[command(about = "Send a draft post to the configured Slack or Discord webhook")]
#[command(version)]
struct Cli {
    /// Notification driver: slack or discord
    #[arg(long, env = ENV_NOTIFICATION_DRIVER)]
    driver: Option<String>,

    /// Discord webhook URL
    #[arg(long, env = ENV_DISCORD_WEBHOOK_URL, hide_env_values = true)]
    discord_webhook_url: Option<String>,

    /// Slack webhook URL
    #[arg(long, env = ENV_SLACK_WEBHOOK_URL, hide_env_values = true)]
    slack_webhook_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_NOTIFICATION_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Draft text; read from stdin (sent unchanged) when omitted or `-`
    draft: Option<String>,
}

impl Cli {
    fn config(&self) -> NotificationConfig {
        NotificationConfig {
            driver: self.driver.clone(),
            discord_webhook_url: self.discord_webhook_url.clone(),
            slack_webhook_url: self.slack_webhook_url.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    fn draft(&self, mut stdin: impl Read) -> Result<String> {
        match self.draft.as_deref() {
            Some(text) if text != "-" => Ok(text.to_string()),
            _ => {
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("Failed to read draft from stdin")?;
                Ok(text)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Before parsing so `.env` values feed the `env = ...` fallbacks.
    draft_notify::config::load_dotenv();

    let cli = Cli::parse();
    let draft = cli.draft(std::io::stdin())?;

    let result = Notifier::new()
        .send_draft(&cli.config(), &draft)
        .await
        .context("Invalid notification configuration")?;

    println!("{result}");

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
