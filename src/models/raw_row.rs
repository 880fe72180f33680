//! Rows of the event log as they are stored on disk.
//!
//! Every field is kept as a string so that a malformed row can still be
//! displayed. Validation into [`TimeEvent`](super::TimeEvent) happens in
//! [`crate::event_log`].

use serde::{Deserialize, Serialize};

use crate::event_log::{DATE_FORMAT, TIME_FORMAT};

use super::TimeEvent;

/// One row of the current log layout
/// (`First Name, Last Name, Action, Date, Time, IP`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// First name as typed.
    #[serde(rename = "First Name", default)]
    pub first_name: String,
    /// Last name as typed.
    #[serde(rename = "Last Name", default)]
    pub last_name: String,
    /// Action label, e.g. "Sign In".
    #[serde(rename = "Action", default)]
    pub action: String,
    /// Date, "YYYY-MM-DD".
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Wall-clock time, 12h or 24h.
    #[serde(rename = "Time", default)]
    pub time: String,
    /// Submitting address, may be empty.
    #[serde(rename = "IP", default)]
    pub ip: String,
}

/// One row of the legacy log layout (`Name, Action, Date, Time`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRow {
    /// Full name in a single field.
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Action label.
    #[serde(rename = "Action", default)]
    pub action: String,
    /// Date, "YYYY-MM-DD".
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Wall-clock time.
    #[serde(rename = "Time", default)]
    pub time: String,
}

/// Splits a combined name on the first whitespace run.
///
/// Everything before the first whitespace is the first name; the rest,
/// trimmed, is the last name (possibly empty).
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::split_legacy_name;
///
/// assert_eq!(split_legacy_name("Mary  Ann Smith"), ("Mary".to_string(), "Ann Smith".to_string()));
/// assert_eq!(split_legacy_name("Cher"), ("Cher".to_string(), String::new()));
/// ```
pub fn split_legacy_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}

impl RawRow {
    /// Upgrades a legacy row to the current layout.
    ///
    /// The IP column did not exist in the legacy layout and is left empty.
    pub fn from_legacy(row: LegacyRow) -> Self {
        let (first_name, last_name) = split_legacy_name(&row.name);
        Self {
            first_name,
            last_name,
            action: row.action,
            date: row.date,
            time: row.time,
            ip: String::new(),
        }
    }
}

impl From<LegacyRow> for RawRow {
    fn from(row: LegacyRow) -> Self {
        RawRow::from_legacy(row)
    }
}

impl From<&TimeEvent> for RawRow {
    fn from(event: &TimeEvent) -> Self {
        Self {
            first_name: event.person.first_name.clone(),
            last_name: event.person.last_name.clone(),
            action: event.action.label().to_string(),
            date: event.date.format(DATE_FORMAT).to_string(),
            time: event.time.format(TIME_FORMAT).to_string(),
            ip: event.source_ip.clone().unwrap_or_default(),
        }
    }
}
