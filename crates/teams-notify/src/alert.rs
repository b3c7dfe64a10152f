//! Alert records accepted by the notifier.

use serde::{Deserialize, Serialize};

/// A single alert raised by an upstream monitoring system.
///
/// All fields are passed through verbatim; empty strings are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub alert_id: String,
    pub service_name: String,
    pub reason: String,
    /// RFC 3339 timestamp, e.g. `2024-01-02T15:04:05Z`
    pub date: String,
}

impl AlertRecord {
    #[must_use]
    pub fn new(
        alert_id: impl Into<String>,
        service_name: impl Into<String>,
        reason: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            alert_id: alert_id.into(),
            service_name: service_name.into(),
            reason: reason.into(),
            date: date.into(),
        }
    }
}
