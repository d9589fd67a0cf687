//! ISO-8601 timestamp parsing.
//!
//! Accepted shapes, tried in order:
//! - RFC 3339 with offset (`2024-01-02T10:00:00+01:00`), normalized to UTC
//! - `YYYY-MM-DDTHH:MM[:SS[.f]]` and the same with a space separator
//! - `YYYY-MM-DD`, at midnight

use crate::error::{ChartError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ChartError::malformed(format!(
        "unparseable timestamp '{raw}' (expected ISO-8601)"
    )))
}
