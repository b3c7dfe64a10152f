//! Notifier configuration.

use std::time::Duration;

use tracing::{debug, warn};

/// Environment variable for the Teams webhook URL.
pub const ENV_TEAMS_WEBHOOK_URL: &str = "TEAMS_WEBHOOK_URL";

/// Environment variable for the display timezone.
pub const ENV_TIMEZONE: &str = "TIMEZONE";

/// Environment variable toggling the alert-id header block.
pub const ENV_INCLUDE_HEADER: &str = "TEAMS_INCLUDE_HEADER";

/// Environment variable toggling timezone conversion of alert dates.
pub const ENV_CONVERT_TIMEZONE: &str = "TEAMS_CONVERT_TIMEZONE";

/// Environment variable for the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TEAMS_TIMEOUT_SECS";

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Settings for an [`AlertNotifier`](crate::AlertNotifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Webhook endpoint. Empty means unconfigured.
    pub webhook_url: String,
    /// IANA zone name used when `convert_timezone` is set.
    pub timezone: String,
    /// Start the card with the emphasized alert-id line.
    pub include_header: bool,
    /// Render the alert date in `timezone`; otherwise pass it through raw.
    pub convert_timezone: bool,
    /// Request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            include_header: true,
            convert_timezone: true,
            timeout: None,
        }
    }
}

impl NotifierConfig {
    /// Create a configuration for `webhook_url` with default settings.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// A missing webhook URL is not an error here; it is reported when an
    /// alert is sent.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let webhook_url = lookup(ENV_TEAMS_WEBHOOK_URL).unwrap_or_default();
        if webhook_url.is_empty() {
            debug!("Teams notifications unconfigured (TEAMS_WEBHOOK_URL not set)");
        }

        let timezone = lookup(ENV_TIMEZONE)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(defaults.timezone);

        let include_header = lookup(ENV_INCLUDE_HEADER)
            .and_then(|v| parse_flag(ENV_INCLUDE_HEADER, &v))
            .unwrap_or(defaults.include_header);

        let convert_timezone = lookup(ENV_CONVERT_TIMEZONE)
            .and_then(|v| parse_flag(ENV_CONVERT_TIMEZONE, &v))
            .unwrap_or(defaults.convert_timezone);

        let timeout = lookup(ENV_TIMEOUT_SECS).and_then(|v| match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                warn!(variable = ENV_TIMEOUT_SECS, value = %v, "Ignoring invalid timeout");
                None
            }
        });

        Self {
            webhook_url,
            timezone,
            include_header,
            convert_timezone,
            timeout,
        }
    }

    /// Whether a webhook URL has been set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}

fn parse_flag(variable: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            warn!(variable, value, "Ignoring unrecognized boolean");
            None
        }
    }
}
