//! Locale-aware date rendering
//!
//! Values that parse as calendar timestamps are rendered with the configured
//! format. Anything else is returned unchanged: several sources already send
//! display-ready dates ("03/09/2025 13.05.25") and those must survive as-is.

use crate::config::NormalizerConfig;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    // DataJud sends compact timestamps such as 20180326152830
    "%Y%m%d%H%M%S",
];

/// A parsed calendar value, already shifted to the display offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// Date and time of day
    DateTime(NaiveDateTime),
    /// Date only
    Date(NaiveDate),
}

/// Try to read `raw` as a calendar value
///
/// Zoned timestamps are converted to the configured offset; naive ones are
/// taken to be local already.
pub fn parse_calendar(raw: &str, config: &NormalizerConfig) -> Option<Calendar> {
    let raw = raw.trim();

    let zoned = DateTime::parse_from_rfc3339(raw)
        // Offsets without a colon, e.g. 2018-10-29T00:00:00.000+0000
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"));
    if let Ok(zoned) = zoned {
        let local = zoned.with_timezone(&config.utc_offset());
        return Some(Calendar::DateTime(local.naive_local()));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(Calendar::DateTime)
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(Calendar::Date)
        })
}

/// Render a movement timestamp
///
/// Date-only input renders with the date format; unparseable input passes
/// through.
pub fn render_datetime(raw: &str, config: &NormalizerConfig) -> String {
    match parse_calendar(raw, config) {
        Some(Calendar::DateTime(dt)) => dt.format(&config.datetime_format).to_string(),
        Some(Calendar::Date(d)) => d.format(&config.date_format).to_string(),
        None => raw.to_string(),
    }
}

/// Render a date, dropping any time of day
pub fn render_date(raw: &str, config: &NormalizerConfig) -> String {
    match parse_calendar(raw, config) {
        Some(Calendar::DateTime(dt)) => dt.date().format(&config.date_format).to_string(),
        Some(Calendar::Date(d)) => d.format(&config.date_format).to_string(),
        None => raw.to_string(),
    }
}
