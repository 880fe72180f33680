//! Payroll summary models.
//!
//! This module contains the outputs of an aggregation pass: per-day tallies,
//! weekly summary rows, and the [`Anomaly`] records describing data that was
//! left out of the summary.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PersonKey;

const SECONDS_PER_HOUR: i64 = 3600;

/// Converts a duration to fractional hours, from whole seconds.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::duration_to_hours;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_to_hours(Duration::minutes(510)), Decimal::new(85, 1));
/// ```
pub fn duration_to_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_seconds()) / Decimal::from(SECONDS_PER_HOUR)
}

/// Net worked time for one person on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTally {
    /// Who worked.
    pub person: PersonKey,
    /// The day worked.
    pub date: NaiveDate,
    /// Sign-out minus sign-in, minus lunch.
    pub worked: Duration,
}

impl DailyTally {
    /// Returns the worked time in fractional hours.
    pub fn worked_hours(&self) -> Decimal {
        duration_to_hours(self.worked)
    }
}

/// Where the hourly rate for a summary row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// A per-person entry in the rate table.
    Configured,
    /// The table's default rate.
    Default,
}

/// Worked hours and payment for one person in one week.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::{RateSource, WeeklySummaryRow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let row = WeeklySummaryRow {
///     first_name: "Jane".to_string(),
///     last_name: "Doe".to_string(),
///     week_start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     week_label: "2024-06-03".to_string(),
///     worked_hours: Decimal::from_str("8.5").unwrap(),
///     rate: Decimal::from_str("35").unwrap(),
///     rate_source: RateSource::Default,
///     payment: Decimal::from_str("297.5").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummaryRow {
    /// First name of the person.
    pub first_name: String,
    /// Last name of the person.
    pub last_name: String,
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Canonical label of the week (its Monday, "YYYY-MM-DD").
    pub week_label: String,
    /// Total worked hours in the week, net of lunch.
    pub worked_hours: Decimal,
    /// Hourly rate applied.
    pub rate: Decimal,
    /// Whether the rate was configured or defaulted.
    pub rate_source: RateSource,
    /// `worked_hours * rate`.
    pub payment: Decimal,
}

/// A data problem found while validating or aggregating the log.
///
/// Anomalies never abort a summary; the affected row or day is left out and
/// the anomaly is returned next to the summary rows. Row numbers are 1-based
/// positions among the log's data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// The row has no first or last name.
    MissingIdentity {
        /// Row number in the log.
        row: usize,
    },
    /// The action label is not a known punch.
    UnknownAction {
        /// Row number in the log.
        row: usize,
        /// The label found.
        action: String,
    },
    /// The date or time could not be parsed.
    MalformedTimestamp {
        /// Row number in the log.
        row: usize,
        /// Raw date field.
        date: String,
        /// Raw time field.
        time: String,
    },
    /// Worked time for the day came out negative; the day was rejected.
    NegativeDuration {
        /// First name of the person.
        first_name: String,
        /// Last name of the person.
        last_name: String,
        /// The rejected day.
        date: NaiveDate,
    },
    /// Lunch-in was before lunch-out; lunch counted as zero.
    NegativeLunch {
        /// First name of the person.
        first_name: String,
        /// Last name of the person.
        last_name: String,
        /// The affected day.
        date: NaiveDate,
    },
}

impl Anomaly {
    /// Returns a short machine-readable code for the anomaly.
    pub fn code(&self) -> &'static str {
        match self {
            Anomaly::MissingIdentity { .. } => "missing_identity",
            Anomaly::UnknownAction { .. } => "unknown_action",
            Anomaly::MalformedTimestamp { .. } => "malformed_timestamp",
            Anomaly::NegativeDuration { .. } => "negative_duration",
            Anomaly::NegativeLunch { .. } => "negative_lunch",
        }
    }
}

/// The full result of a payroll aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Weekly rows sorted by first name, last name, week label.
    pub rows: Vec<WeeklySummaryRow>,
    /// Rows and days left out of the summary.
    pub anomalies: Vec<Anomaly>,
}

impl PayrollReport {
    /// Returns the sum of all payments in the report.
    pub fn total_payment(&self) -> Decimal {
        self.rows.iter().map(|r| r.payment).sum()
    }
}
