//! Date/time utilities for whisperbox.
//!
//! Timestamps are stored as UTC TEXT columns in the SQLite format
//! (`YYYY-MM-DD HH:MM:SS`). These helpers keep the format in one place.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Storage format for timestamp columns.
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current time as a database timestamp string.
pub fn now_timestamp() -> String {
    Utc::now().format(DB_TIMESTAMP_FORMAT).to_string()
}

/// A database timestamp string `secs` seconds from now.
///
/// Used for verification-code expiries.
pub fn timestamp_after_secs(secs: i64) -> String {
    (Utc::now() + Duration::seconds(secs))
        .format(DB_TIMESTAMP_FORMAT)
        .to_string()
}

/// Parse a stored timestamp back into a `DateTime<Utc>`.
///
/// Accepts the SQLite format first, then RFC3339 as a fallback.
/// Returns `None` if the string matches neither.
pub fn parse_timestamp(datetime_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, DB_TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

/// Convert a database timestamp string to RFC3339 format.
///
/// Useful for Web API responses where the frontend expects RFC3339
/// timestamps. The database stores times in UTC, so this appends 'Z'.
pub fn to_rfc3339(datetime_str: &str) -> String {
    format!("{}Z", datetime_str.replace(' ', "T"))
}
