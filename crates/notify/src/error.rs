//! Error types for draft delivery.

use thiserror::Error;

use crate::config::Driver;

/// Misconfiguration detected before any webhook is contacted.
///
/// These abort [`crate::Notifier::send_draft`] and must be handled by the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `NOTIFICATION_DRIVER` is unset or empty
    #[error("NOTIFICATION_DRIVER is not configured; must be one of {{slack, discord}}")]
    DriverNotConfigured,

    /// `NOTIFICATION_DRIVER` names something other than slack or discord
    #[error("unsupported notification driver: {0}")]
    UnsupportedDriver(String),

    /// The selected driver's webhook URL is unset or empty
    #[error("{var} is not configured")]
    WebhookUrlMissing { var: &'static str },

    /// The webhook URL does not carry the driver's required prefix
    #[error("invalid {driver} webhook URL format (expected prefix {expected}): {url}")]
    InvalidWebhookUrl {
        driver: Driver,
        expected: &'static str,
        url: String,
    },

    /// `NOTIFICATION_TIMEOUT_SECS` is not a positive integer
    #[error("invalid NOTIFICATION_TIMEOUT_SECS (expected a positive number of seconds): {0}")]
    InvalidTimeout(String),
}

/// Errors that can occur while posting to a webhook.
///
/// Never surfaced from `send_draft`; folded into
/// [`crate::DeliveryResult::Failure`] instead.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed")]
    Http(#[source] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Webhook answered with a non-success status
    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Payload could not be serialized
    #[error("failed to serialize payload")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ChannelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            // Webhook URLs carry their secret in the path.
            Self::Http(err.without_url())
        }
    }
}

/// Render an error together with its `source()` chain, `outer: inner: ...`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
