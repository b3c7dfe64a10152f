//! Alert delivery to a Teams webhook.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::alert::AlertRecord;
use crate::card::{build_message, TeamsMessage};
use crate::config::NotifierConfig;
use crate::error::NotifyError;
use crate::timezone::format_in_timezone;

/// Formats alerts as Adaptive Cards and posts them to a Teams webhook.
///
/// Holds no mutable state, so one instance can be shared across tasks.
/// Each [`send`](Self::send) is a single attempt; retry policy belongs to
/// the caller.
#[derive(Debug, Clone)]
pub struct AlertNotifier {
    config: NotifierConfig,
    client: reqwest::Client,
}

impl AlertNotifier {
    /// Create a notifier from an explicit configuration.
    pub fn new(config: NotifierConfig) -> Result<Self, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    /// Create a notifier from environment variables.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::new(NotifierConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Build the message that would be posted for `alert`.
    ///
    /// Applies timezone conversion when enabled; no network I/O.
    pub fn prepare(&self, alert: &AlertRecord) -> Result<TeamsMessage, NotifyError> {
        let date = if self.config.convert_timezone {
            format_in_timezone(&alert.date, &self.config.timezone)?
        } else {
            alert.date.clone()
        };

        Ok(build_message(alert, &date, self.config.include_header))
    }

    /// Format and deliver an alert.
    pub async fn send(&self, alert: &AlertRecord) -> Result<(), NotifyError> {
        debug!(alert_id = %alert.alert_id, service = %alert.service_name, "Sending Teams alert");

        let result = self.deliver(alert).await;
        match &result {
            Ok(()) => info!(alert_id = %alert.alert_id, "Teams alert delivered"),
            Err(e) => error!(
                alert_id = %alert.alert_id,
                stage = e.stage(),
                error = %e,
                "Failed to send Teams alert"
            ),
        }
        result
    }

    /// Like [`send`](Self::send), but gives up with [`NotifyError::Cancelled`]
    /// once `cancel` fires. An in-flight request is dropped.
    pub async fn send_with_cancel(
        &self,
        alert: &AlertRecord,
        cancel: &CancellationToken,
    ) -> Result<(), NotifyError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(alert_id = %alert.alert_id, "Teams alert cancelled");
                Err(NotifyError::Cancelled)
            }
            result = self.send(alert) => result,
        }
    }

    async fn deliver(&self, alert: &AlertRecord) -> Result<(), NotifyError> {
        if !self.config.is_configured() {
            return Err(NotifyError::Configuration(
                "Teams webhook URL is not set".to_string(),
            ));
        }

        let message = self.prepare(alert)?;
        let body = serde_json::to_vec(&message)?;
        debug!(bytes = body.len(), "Teams payload prepared");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        // Body is never inspected; dropping the response releases the connection
        let status = response.status();
        drop(response);
        debug!(status = status.as_u16(), "Teams webhook responded");

        if status != StatusCode::OK {
            return Err(NotifyError::UnexpectedStatus(status.as_u16()));
        }

        Ok(())
    }
}

/// Read configuration from the environment and send one alert.
///
/// The environment is read on every call.
pub async fn send_alert_from_env(alert: &AlertRecord) -> Result<(), NotifyError> {
    AlertNotifier::from_env()?.send(alert).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(config: NotifierConfig) -> AlertNotifier {
        AlertNotifier::new(config).unwrap()
    }

    fn alert(date: &str) -> AlertRecord {
        AlertRecord::new("A-1", "api", "down", date)
    }

    #[test]
    fn test_prepare_converts_timezone() {
        let config = NotifierConfig {
            timezone: "Asia/Seoul".to_string(),
            ..NotifierConfig::new("https://example.test/hook")
        };
        let message = notifier(config).prepare(&alert("2024-01-02T15:04:05Z")).unwrap();
        let body = message.card().body();
        assert_eq!(body.len(), 4);
        assert_eq!(body[3].text, "ㆍ Date: 2024-01-03 00:04:05");
    }

    #[test]
    fn test_prepare_passes_raw_date_without_conversion() {
        let config = NotifierConfig {
            timezone: "Mars/Phobos".to_string(),
            convert_timezone: false,
            include_header: false,
            ..NotifierConfig::new("https://example.test/hook")
        };
        let message = notifier(config).prepare(&alert("not-a-date")).unwrap();
        let body = message.card().body();
        assert_eq!(body.len(), 3);
        assert_eq!(body[2].text, "ㆍ Date: not-a-date");
    }

    #[tokio::test]
    async fn test_send_without_url_is_configuration_error() {
        let err = notifier(NotifierConfig::default())
            .send(&alert("2024-01-02T15:04:05Z"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let token = CancellationToken::new();
        token.cancel();
        let err = notifier(NotifierConfig::new("http://127.0.0.1:9/hook"))
            .send_with_cancel(&alert("2024-01-02T15:04:05Z"), &token)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Cancelled));
    }
}
