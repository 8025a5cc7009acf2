//! Normalization of raw dispatch timestamps into display strings.
//!
//! The stored metafield is compared by exact string equality, so every raw
//! timestamp is rendered in one fixed timezone with one fixed format. The same
//! upstream value always produces the same string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

/// Reference timezone for rendering dispatch dates.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Short date, e.g. `Jun 12, 2025`.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Epoch values above this are taken to be milliseconds (year ~5138 in seconds).
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Renders a raw timestamp as a display date in [`DISPLAY_TIMEZONE`].
///
/// Accepts:
/// - RFC 3339 strings (`2025-06-12T16:00:00Z`, `2025-06-12T12:00:00-04:00`)
/// - naive date-times (`2025-06-12T16:00:00`, `2025-06-12 16:00:00`), read as UTC
/// - bare dates (`2025-06-12`), formatted as-is with no timezone shift
/// - Unix epoch seconds or milliseconds, as a JSON number or numeric string
///
/// Returns `None` for anything else.
#[must_use]
pub fn normalize_timestamp(raw: &Value) -> Option<String> {
    match raw {
        Value::Number(n) => n.as_i64().and_then(from_epoch),
        Value::String(s) => normalize_str(s.trim()),
        _ => None,
    }
}

fn normalize_str(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(render(dt.with_timezone(&Utc)));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(render(Utc.from_utc_datetime(&naive)));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.format(DISPLAY_FORMAT).to_string());
    }

    s.parse::<i64>().ok().and_then(from_epoch)
}

fn from_epoch(value: i64) -> Option<String> {
    let dt = if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp_millis(value)?
    } else {
        DateTime::from_timestamp(value, 0)?
    };
    Some(render(dt))
}

fn render(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&DISPLAY_TIMEZONE)
        .format(DISPLAY_FORMAT)
        .to_string()
}
