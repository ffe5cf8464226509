//! Outcome of a delivery attempt.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::Driver;

/// Result of posting a draft to a webhook.
///
/// Transport failures are reported here as data rather than as errors. The
/// [`fmt::Display`] rendering is the human-readable status line: it starts with
/// `Success` or `Failed to send draft to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The webhook accepted the draft
    Success {
        driver: Driver,
        delivered_at: DateTime<Utc>,
    },

    /// The webhook could not be reached or rejected the draft
    Failure { driver: Driver, detail: String },
}

impl DeliveryResult {
    /// A success stamped with the current time.
    #[must_use]
    pub fn success(driver: Driver) -> Self {
        Self::Success {
            driver,
            delivered_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The driver the draft was routed to.
    #[must_use]
    pub const fn driver(&self) -> Driver {
        match self {
            Self::Success { driver, .. } | Self::Failure { driver, .. } => *driver,
        }
    }
}

impl fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                driver,
                delivered_at,
            } => f.write_str(&driver.channel().success_message(delivered_at)),
            Self::Failure { driver, detail } => {
                f.write_str(&driver.channel().failure_message(detail))
            }
        }
    }
}
