//! Error types for alert delivery.

use thiserror::Error;

/// Errors that can occur while formatting or delivering an alert.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Notifier is missing required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Alert date is not valid RFC 3339
    #[error("Invalid date format {date:?}: {source}")]
    InvalidDateFormat {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Timezone is not in the zone database
    #[error("Invalid timezone {timezone:?}: {reason}")]
    InvalidTimezone { timezone: String, reason: String },

    /// Payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be built or sent
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Webhook answered with something other than 200
    #[error("Teams webhook error: received status code {0}")]
    UnexpectedStatus(u16),

    /// Delivery was cancelled by the caller
    #[error("Delivery cancelled")]
    Cancelled,
}

impl NotifyError {
    /// Name of the pipeline step that failed, for structured logs.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InvalidDateFormat { .. } | Self::InvalidTimezone { .. } => "timezone",
            Self::Serialization(_) => "serialization",
            Self::Transport(_) => "transport",
            Self::UnexpectedStatus(_) => "response",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let err = NotifyError::UnexpectedStatus(500);
        assert_eq!(
            err.to_string(),
            "Teams webhook error: received status code 500"
        );
        assert_eq!(err.stage(), "response");
    }

    #[test]
    fn test_invalid_date_keeps_source() {
        let source = chrono::DateTime::parse_from_rfc3339("nope").unwrap_err();
        let err = NotifyError::InvalidDateFormat {
            date: "nope".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.stage(), "timezone");
    }
}
