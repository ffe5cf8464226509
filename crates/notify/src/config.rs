//! Notification configuration.
//!
//! Configuration is a plain value passed into [`crate::Notifier::send_draft`].
//! [`NotificationConfig::from_env`] is the only place process environment is
//! read, and it reads fresh on every call.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Once;
use std::time::Duration;

use tracing::{debug, warn};

use crate::channels::{discord::DiscordChannel, slack::SlackChannel, WebhookChannel};
use crate::error::ConfigError;

/// Environment variable selecting the driver (`slack` or `discord`).
pub const ENV_NOTIFICATION_DRIVER: &str = "NOTIFICATION_DRIVER";

/// Environment variable for the Discord webhook URL.
pub const ENV_DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";

/// Environment variable for the Slack webhook URL.
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Environment variable for the per-request timeout, in seconds.
pub const ENV_NOTIFICATION_TIMEOUT_SECS: &str = "NOTIFICATION_TIMEOUT_SECS";

/// Destination integration a draft is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    Slack,
    Discord,
}

impl Driver {
    /// Lowercase name as accepted in `NOTIFICATION_DRIVER`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Discord => "discord",
        }
    }

    /// The webhook channel implementing this driver.
    #[must_use]
    pub fn channel(self) -> &'static dyn WebhookChannel {
        match self {
            Self::Slack => &SlackChannel,
            Self::Discord => &DiscordChannel,
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        match normalized.as_str() {
            "slack" => Ok(Self::Slack),
            "discord" => Ok(Self::Discord),
            _ => Err(ConfigError::UnsupportedDriver(normalized)),
        }
    }
}

/// Raw notification settings.
///
/// Values are kept as given; validation happens in [`NotificationConfig::driver`]
/// and in the channel when the draft is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Raw `NOTIFICATION_DRIVER` value (case-insensitive)
    pub driver: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub slack_webhook_url: Option<String>,
    /// Per-request HTTP timeout; `None` leaves the client default
    pub request_timeout: Option<Duration>,
}

impl NotificationConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = lookup(ENV_NOTIFICATION_TIMEOUT_SECS)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_timeout_secs(&raw))
            .transpose()?;

        Ok(Self {
            driver: lookup(ENV_NOTIFICATION_DRIVER),
            discord_webhook_url: lookup(ENV_DISCORD_WEBHOOK_URL),
            slack_webhook_url: lookup(ENV_SLACK_WEBHOOK_URL),
            request_timeout,
        })
    }

    /// Resolve the configured driver, normalizing case.
    pub fn driver(&self) -> Result<Driver, ConfigError> {
        self.driver
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::DriverNotConfigured)?
            .parse()
    }

    /// The webhook URL configured for `driver`, if non-empty.
    #[must_use]
    pub fn webhook_url(&self, driver: Driver) -> Option<&str> {
        let url = match driver {
            Driver::Slack => self.slack_webhook_url.as_deref(),
            Driver::Discord => self.discord_webhook_url.as_deref(),
        };
        url.filter(|url| !url.is_empty())
    }
}

/// Parse a positive number of seconds into a timeout.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

static DOTENV: Once = Once::new();

/// Load a local `.env` file into the process environment, if one exists.
///
/// Only the first call per process reads the file. Variables already set in
/// the environment win over the file, and variables removed afterwards stay
/// removed.
pub fn load_dotenv() {
    load_env_file_once(&DOTENV, dotenvy::dotenv);
}

fn load_env_file_once<F>(once: &Once, load: F)
where
    F: FnOnce() -> dotenvy::Result<PathBuf>,
{
    once.call_once(|| match load() {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to load .env file"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_driver_is_case_insensitive() {
        assert_eq!("discord".parse::<Driver>().unwrap(), Driver::Discord);
        assert_eq!("Discord".parse::<Driver>().unwrap(), Driver::Discord);
        assert_eq!("SLACK".parse::<Driver>().unwrap(), Driver::Slack);
    }

    #[test]
    fn test_unsupported_driver_names_value() {
        let err = "teams".parse::<Driver>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDriver(ref v) if v == "teams"));
        assert!(err.to_string().contains("teams"));
    }

    #[test]
    fn test_driver_must_match_exactly() {
        assert!(" slack".parse::<Driver>().is_err());
        assert!("slack-bot".parse::<Driver>().is_err());
    }

    #[test]
    fn test_missing_driver() {
        let config = NotificationConfig::default();
        assert!(matches!(
            config.driver(),
            Err(ConfigError::DriverNotConfigured)
        ));

        let config = NotificationConfig {
            driver: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.driver(),
            Err(ConfigError::DriverNotConfigured)
        ));
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = NotificationConfig::from_lookup(lookup_from(&[
            ("NOTIFICATION_DRIVER", "Slack"),
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T/B/X"),
            ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
            ("NOTIFICATION_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.driver().unwrap(), Driver::Slack);
        assert_eq!(
            config.webhook_url(Driver::Slack),
            Some("https://hooks.slack.com/services/T/B/X")
        );
        assert_eq!(
            config.webhook_url(Driver::Discord),
            Some("https://discord.com/api/webhooks/1/abc")
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_empty_webhook_url_is_missing() {
        let config = NotificationConfig {
            discord_webhook_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.webhook_url(Driver::Discord), None);
        assert_eq!(config.webhook_url(Driver::Slack), None);
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_secs("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout_secs(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(matches!(
            parse_timeout_secs("0"),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            parse_timeout_secs("soon"),
            Err(ConfigError::InvalidTimeout(ref v)) if v == "soon"
        ));

        let err = NotificationConfig::from_lookup(lookup_from(&[(
            "NOTIFICATION_TIMEOUT_SECS",
            "-1",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_fresh_values() {
        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::set_var(ENV_NOTIFICATION_DRIVER, "discord");
            std::env::remove_var(ENV_NOTIFICATION_TIMEOUT_SECS);
        }
        let first = NotificationConfig::from_env().unwrap();
        assert_eq!(first.driver().unwrap(), Driver::Discord);

        unsafe {
            std::env::set_var(ENV_NOTIFICATION_DRIVER, "Slack");
        }
        let second = NotificationConfig::from_env().unwrap();
        assert_eq!(second.driver().unwrap(), Driver::Slack);

        unsafe {
            std::env::remove_var(ENV_NOTIFICATION_DRIVER);
        }
        assert!(matches!(
            NotificationConfig::from_env().unwrap().driver(),
            Err(ConfigError::DriverNotConfigured)
        ));
    }

    #[test]
    #[serial]
    fn test_env_file_does_not_restore_removed_vars() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "NOTIFICATION_DRIVER=discord\n").unwrap();

        let once = Once::new();
        let load = || dotenvy::from_path(&env_file).map(|()| env_file.clone());

        // SAFETY: This test runs serially via #[serial] to avoid env var races
        unsafe {
            std::env::remove_var(ENV_NOTIFICATION_DRIVER);
            std::env::remove_var(ENV_NOTIFICATION_TIMEOUT_SECS);
        }

        load_env_file_once(&once, load);
        assert_eq!(
            NotificationConfig::from_env().unwrap().driver().unwrap(),
            Driver::Discord
        );

        unsafe {
            std::env::remove_var(ENV_NOTIFICATION_DRIVER);
        }
        load_env_file_once(&once, load);
        assert!(matches!(
            NotificationConfig::from_env().unwrap().driver(),
            Err(ConfigError::DriverNotConfigured)
        ));
    }
}
