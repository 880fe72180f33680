//! Weekly worked-hours aggregation and payroll computation.
//!
//! This module turns an [`EventLog`] into one [`WeeklySummaryRow`] per person
//! per Monday-start week. Days missing a sign-in or sign-out are left out
//! silently; days with negative worked time are left out and reported.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::config::RateTable;
use crate::event_log::{validate_rows, EventLog};
use crate::models::{
    duration_to_hours, Anomaly, DailyTally, PayrollReport, PersonKey, RawRow, TimeEvent,
    WeeklySummaryRow,
};

use super::day_punches::{tally_day, DayOutcome, DayPunches};
use super::rate_lookup::lookup_rate;
use super::week_bucket::{week_label, week_start};

/// Groups events by person, then by date, in sorted order.
fn day_buckets(log: &EventLog) -> BTreeMap<(&PersonKey, NaiveDate), Vec<&TimeEvent>> {
    let mut buckets: BTreeMap<(&PersonKey, NaiveDate), Vec<&TimeEvent>> = BTreeMap::new();
    for event in log.events() {
        buckets
            .entry((&event.person, event.date))
            .or_default()
            .push(event);
    }
    buckets
}

/// Computes the net worked time of every complete day in the log.
///
/// Returns the tallies in person and date order, plus the anomalies found
/// on rejected days and on days with a negative lunch pair.
pub fn daily_tallies(log: &EventLog) -> (Vec<DailyTally>, Vec<Anomaly>) {
    let mut tallies = Vec::new();
    let mut anomalies = Vec::new();

    for ((person, date), events) in day_buckets(log) {
        let punches = DayPunches::from_events(events);
        let result = tally_day(person, date, &punches);

        if let Some(anomaly) = result.lunch_anomaly {
            warn!(person = %person, date = %date, "Lunch in before lunch out, counting lunch as zero");
            anomalies.push(anomaly);
        }

        match result.outcome {
            DayOutcome::Tallied(tally) => tallies.push(tally),
            DayOutcome::Incomplete => {}
            DayOutcome::Rejected(anomaly) => {
                warn!(person = %person, date = %date, "Negative worked time, day rejected");
                anomalies.push(anomaly);
            }
        }
    }

    (tallies, anomalies)
}

/// Aggregates an event log into weekly worked hours and payments.
///
/// Rows are sorted by first name, last name and week label. Hours are
/// summed as durations per week and converted to fractional hours once, so
/// the weekly totals add up exactly to the daily ones.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::{aggregate, DEFAULT_HOURLY_RATE};
/// use timesheet_payroll::config::RateTable;
/// use timesheet_payroll::event_log::validate_rows;
/// use timesheet_payroll::models::RawRow;
/// use rust_decimal::Decimal;
///
/// let row = |action: &str, time: &str| RawRow {
///     first_name: "Jane".into(),
///     last_name: "Doe".into(),
///     action: action.into(),
///     date: "2024-06-03".into(),
///     time: time.into(),
///     ip: String::new(),
/// };
/// let rows = vec![
///     row("Sign In", "08:00:00 AM"),
///     row("Lunch Break Out", "12:00:00 PM"),
///     row("Lunch Break In", "12:30:00 PM"),
///     row("Sign Out", "05:00:00 PM"),
/// ];
///
/// let log = validate_rows(&rows).log;
/// let report = aggregate(&log, &RateTable::new(DEFAULT_HOURLY_RATE));
///
/// assert_eq!(report.rows.len(), 1);
/// assert_eq!(report.rows[0].week_label, "2024-06-03");
/// assert_eq!(report.rows[0].worked_hours, Decimal::new(85, 1));
/// assert_eq!(report.rows[0].payment, Decimal::new(2975, 1));
/// ```
pub fn aggregate(log: &EventLog, rates: &RateTable) -> PayrollReport {
    let (tallies, anomalies) = daily_tallies(log);

    let mut weeks: BTreeMap<(PersonKey, NaiveDate), Duration> = BTreeMap::new();
    for tally in tallies {
        let worked = weeks
            .entry((tally.person, week_start(tally.date)))
            .or_insert_with(Duration::zero);
        *worked = *worked + tally.worked;
    }

    let rows: Vec<WeeklySummaryRow> = weeks
        .into_iter()
        .map(|((person, monday), worked)| {
            let worked_hours = duration_to_hours(worked);
            let rate = lookup_rate(&person, rates);
            WeeklySummaryRow {
                week_label: week_label(monday),
                week_start: monday,
                worked_hours,
                rate: rate.rate,
                rate_source: rate.source,
                payment: worked_hours * rate.rate,
                first_name: person.first_name,
                last_name: person.last_name,
            }
        })
        .collect();

    info!(
        events = log.len(),
        weekly_rows = rows.len(),
        anomalies = anomalies.len(),
        "Payroll aggregation completed"
    );

    PayrollReport { rows, anomalies }
}

/// Validates stored rows and aggregates them in one pass.
///
/// Validation anomalies come first in the report, followed by the ones
/// found during aggregation.
pub fn summarize(rows: &[RawRow], rates: &RateTable) -> PayrollReport {
    let validation = validate_rows(rows);
    let mut report = aggregate(&validation.log, rates);

    let mut anomalies = validation.anomalies;
    anomalies.append(&mut report.anomalies);
    report.anomalies = anomalies;
    report
}
