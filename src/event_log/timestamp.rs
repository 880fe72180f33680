//! Date and time parsing for stored punches.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveTime};

/// Date format used in the event log.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format written to the event log (12-hour clock with seconds).
pub const TIME_FORMAT: &str = "%I:%M:%S %p";

/// Years a stored date may carry. Four-digit years keep week labels
/// sorting in calendar order.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Time formats accepted when reading the log, tried in order.
const ACCEPTED_TIME_FORMATS: [&str; 4] = [TIME_FORMAT, "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Parses a stored date ("YYYY-MM-DD").
///
/// Dates outside [`SUPPORTED_YEARS`] are rejected.
///
/// # Example
///
/// ```
/// use timesheet_payroll::event_log::parse_date;
///
/// assert!(parse_date("2024-06-03").is_some());
/// assert!(parse_date("2024-13-40").is_none());
/// assert!(parse_date("-262143-01-01").is_none());
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
}

/// Parses a stored wall-clock time in 12-hour or 24-hour form.
///
/// # Example
///
/// ```
/// use timesheet_payroll::event_log::parse_time;
/// use chrono::NaiveTime;
///
/// let expected = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// assert_eq!(parse_time("05:00:00 PM"), Some(expected));
/// assert_eq!(parse_time("17:00:00"), Some(expected));
/// ```
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    ACCEPTED_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
