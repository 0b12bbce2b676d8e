//! Lenient timestamp parsing for catalog records.
//!
//! Accepted forms, tried in order:
//!
//! | Form | Example |
//! |------|---------|
//! | RFC 3339 | `1969-07-20T20:17:00-04:00` |
//! | Date, time, numeric offset | `1969-07-20 20:17:00 -0400` |
//! | Naive date and time | `1969-07-20 20:17:00`, `1969-07-20T20:17` |
//! | Naive date | `1969-07-20` |
//! | Written-out date | `July 20, 1969`, `20 July 1969` |
//!
//! Values without an offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Formats carrying an explicit offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats for a date with a time of day and no offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Formats for a bare calendar date.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%d %B %Y", "%d %B, %Y"];

/// Parse a catalog timestamp. Returns `None` if no accepted form matches.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date);
    }

    if let Some(date) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}
