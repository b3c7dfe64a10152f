//! Rendering alert timestamps in a configured timezone.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::error::NotifyError;

/// Date and separator every accepted timestamp starts with. RFC 3339 also
/// allows a space or lowercase `t` here; alert dates must use `T`.
const DATE_PREFIX: &str = "%Y-%m-%dT";

/// Output format for converted timestamps.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert an RFC 3339 timestamp into `timezone` and render it as
/// `YYYY-MM-DD HH:MM:SS`.
///
/// The timezone is resolved before the date is parsed, so a bad zone is
/// reported even when the date is also malformed. Subseconds are truncated.
pub fn format_in_timezone(date: &str, timezone: &str) -> Result<String, NotifyError> {
    let tz = timezone
        .parse::<Tz>()
        .map_err(|e| NotifyError::InvalidTimezone {
            timezone: timezone.to_string(),
            reason: e.to_string(),
        })?;

    let instant = NaiveDate::parse_and_remainder(date, DATE_PREFIX)
        .and_then(|_| DateTime::parse_from_rfc3339(date))
        .map_err(|source| NotifyError::InvalidDateFormat {
            date: date.to_string(),
            source,
        })?;

    Ok(instant.with_timezone(&tz).format(DATE_FORMAT).to_string())
}
