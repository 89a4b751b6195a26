//! Record timestamp recovery.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;

use super::ExtractError;

/// `HH:MM:SS.mmm` anywhere in a record. Field validity (hour < 24 etc.) is
/// checked by the chrono parse, not the pattern.
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}:\d{2}\.\d{3}").unwrap());

/// Milliseconds since midnight of the first `HH:MM:SS.mmm` timestamp found
/// in `record`.
///
/// Records carry their timestamp in the block header, so the first match is
/// the record's own; later matches belong to embedded payload fields and are
/// ignored.
pub fn timestamp_ms(record: &str) -> Result<i64, ExtractError> {
    let matched = TIMESTAMP
        .find(record)
        .ok_or(ExtractError::MalformedTimestamp)?;
    let time = NaiveTime::parse_from_str(matched.as_str(), "%H:%M:%S%.3f")
        .map_err(|_| ExtractError::MalformedTimestamp)?;

    Ok(i64::from(time.num_seconds_from_midnight()) * 1000
        + i64::from(time.nanosecond() / 1_000_000))
}
