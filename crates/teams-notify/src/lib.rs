//! Microsoft Teams alert notifications.
//!
//! This crate formats alert records as Teams Adaptive Cards and posts them
//! to an incoming webhook, reporting success or a classified failure.
//!
//! # Usage
//!
//! ```no_run
//! use teams_notify::{AlertNotifier, AlertRecord, NotifierConfig};
//!
//! # async fn run() -> Result<(), teams_notify::NotifyError> {
//! let notifier = AlertNotifier::new(NotifierConfig {
//!     timezone: "Asia/Seoul".to_string(),
//!     ..NotifierConfig::new("https://example.webhook.office.com/...")
//! })?;
//!
//! notifier
//!     .send(&AlertRecord::new(
//!         "A-42",
//!         "checkout",
//!         "latency p99 > 2s",
//!         "2024-01-02T15:04:05Z",
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`NotifierConfig::from_env`] reads:
//!
//! - `TEAMS_WEBHOOK_URL`: webhook endpoint (required to send)
//! - `TIMEZONE`: display timezone, defaults to `UTC`
//! - `TEAMS_INCLUDE_HEADER`: include the alert-id header line, defaults to `true`
//! - `TEAMS_CONVERT_TIMEZONE`: convert dates into `TIMEZONE`, defaults to `true`
//! - `TEAMS_TIMEOUT_SECS`: request timeout, unset by default
//!
//! # Architecture
//!
//! - [`timezone`] renders RFC 3339 dates in a target zone
//! - [`card`] builds the fixed-shape [`TeamsMessage`]
//! - [`AlertNotifier`] serializes, posts and classifies the response

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod card;
pub mod config;
pub mod error;
pub mod notifier;
pub mod timezone;

pub use alert::AlertRecord;
pub use card::{build_message, TeamsMessage, TextBlock};
pub use config::NotifierConfig;
pub use error::NotifyError;
pub use notifier::{send_alert_from_env, AlertNotifier};
pub use timezone::format_in_timezone;
