//! Time event model and person identity.
//!
//! This module defines [`PersonKey`] and [`TimeEvent`], the validated form
//! of one row of the time-clock log.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Action;

/// Identity of a person in the log.
///
/// Names are compared exactly as stored; no case folding is applied here.
/// Ordering is by first name, then last name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonKey {
    /// The person's first name.
    pub first_name: String,
    /// The person's last name.
    pub last_name: String,
}

impl PersonKey {
    /// Creates a new person key.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A single validated punch.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::{Action, PersonKey, TimeEvent};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let event = TimeEvent {
///     person: PersonKey::new("Jane", "Doe"),
///     action: Action::SignIn,
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     source_ip: None,
/// };
/// assert_eq!(event.timestamp().to_string(), "2024-06-03 08:00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEvent {
    /// Who punched.
    #[serde(flatten)]
    pub person: PersonKey,
    /// What kind of punch it was.
    pub action: Action,
    /// Local calendar date of the punch.
    pub date: NaiveDate,
    /// Local wall-clock time of the punch.
    pub time: NaiveTime,
    /// Address the punch was submitted from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
}

impl TimeEvent {
    /// Returns the combined date and time of the punch.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
