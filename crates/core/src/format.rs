//! Display formatting for appointment instants.
//!
//! All renderings use UTC regardless of the viewer's timezone, so a
//! booking shows the same calendar day to every customer.

use chrono::{DateTime, NaiveDate, Utc};
use crate::Time;

const DATE_FORMAT: &str = "%a, %b %-d";
const TIME_FORMAT: &str = "%-I:%M %p";

/// Render an instant string as `"Mon, Jan 1"`.
///
/// Empty input yields an empty string, as does input that is neither an
/// RFC 3339 timestamp nor a `YYYY-MM-DD` date.
pub fn format_date(input: &str) -> String {
    parse_instant(input)
        .map(|t| format_date_at(&t))
        .unwrap_or_default()
}

/// Render an instant string as `"10:00 AM"`.
///
/// Same empty and unparseable handling as [`format_date`].
pub fn format_time(input: &str) -> String {
    parse_instant(input)
        .map(|t| format_time_at(&t))
        .unwrap_or_default()
}

/// Render a typed instant as a short weekday, month and day.
pub fn format_date_at(instant: &Time) -> String {
    instant.format(DATE_FORMAT).to_string()
}

/// Render a typed instant as hour:minute with AM/PM.
pub fn format_time_at(instant: &Time) -> String {
    instant.format(TIME_FORMAT).to_string()
}

fn parse_instant(input: &str) -> Option<Time> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(input) {
        return Some(t.with_timezone(&Utc));
    }

    // Date-only values mean midnight UTC
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
