//! Week bucketing.
//!
//! Weeks start on Monday (ISO 8601). A week is identified by its Monday,
//! formatted "YYYY-MM-DD", which sorts in calendar order.

use chrono::{Datelike, Days, NaiveDate};

use crate::event_log::DATE_FORMAT;

/// Returns the Monday of the week containing `date`.
///
/// A week that would start before the earliest representable date is
/// clamped to `NaiveDate::MIN`.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::week_start;
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let since_monday = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(since_monday).unwrap_or(NaiveDate::MIN)
}

/// Returns the canonical label of the week containing `date`.
pub fn week_label(date: NaiveDate) -> String {
    week_start(date).format(DATE_FORMAT).to_string()
}
