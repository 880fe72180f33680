//! Per-day punch collection and daily worked-time tally.
//!
//! A day bucket holds every punch of one person on one calendar date. Only
//! the latest punch of each action counts; a day needs both a sign-in and a
//! sign-out to be tallied.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Action, Anomaly, DailyTally, PersonKey, TimeEvent};

/// The latest timestamp of each action within one day bucket.
///
/// # Example
///
/// ```
/// use timesheet_payroll::calculation::DayPunches;
/// use timesheet_payroll::models::Action;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let mut punches = DayPunches::default();
/// punches.record(Action::SignIn, at("2024-06-03 08:00:00"));
/// punches.record(Action::SignIn, at("2024-06-03 08:05:00"));
/// assert_eq!(punches.get(Action::SignIn), Some(at("2024-06-03 08:05:00")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPunches {
    latest: HashMap<Action, NaiveDateTime>,
}

impl DayPunches {
    /// Builds the punch map from events in timestamp order.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a TimeEvent>,
    {
        let mut punches = Self::default();
        for event in events {
            punches.record(event.action, event.timestamp());
        }
        punches
    }

    /// Records a punch; it replaces any earlier punch of the same action.
    pub fn record(&mut self, action: Action, at: NaiveDateTime) {
        self.latest.insert(action, at);
    }

    /// Returns the retained timestamp for an action.
    pub fn get(&self, action: Action) -> Option<NaiveDateTime> {
        self.latest.get(&action).copied()
    }

    /// Returns lunch-in minus lunch-out, or zero when either is missing.
    ///
    /// A negative lunch pair is returned as-is; the caller decides what to
    /// do with it.
    pub fn lunch_duration(&self) -> Duration {
        match (self.get(Action::LunchOut), self.get(Action::LunchIn)) {
            (Some(out), Some(back)) => back - out,
            _ => Duration::zero(),
        }
    }
}

/// The outcome of tallying one day bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// A complete day with a non-negative worked time.
    Tallied(DailyTally),
    /// Sign-in or sign-out missing; the day is left out without a report.
    Incomplete,
    /// The day was rejected because its worked time is negative.
    Rejected(Anomaly),
}

/// The tally of one day bucket plus any non-fatal anomaly found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTallyResult {
    /// What happened to the day.
    pub outcome: DayOutcome,
    /// Set when a negative lunch pair was counted as zero.
    pub lunch_anomaly: Option<Anomaly>,
}

/// Tallies the net worked time of one person on one day.
///
/// `worked = (sign_out - sign_in) - lunch`, where `lunch` is
/// `lunch_in - lunch_out` when both are present and zero otherwise. A
/// negative lunch pair counts as zero and is reported; a negative work
/// span or a lunch longer than the work span rejects the day.
pub fn tally_day(person: &PersonKey, date: NaiveDate, punches: &DayPunches) -> DayTallyResult {
    let (Some(sign_in), Some(sign_out)) = (punches.get(Action::SignIn), punches.get(Action::SignOut))
    else {
        return DayTallyResult {
            outcome: DayOutcome::Incomplete,
            lunch_anomaly: None,
        };
    };

    let negative_duration = || Anomaly::NegativeDuration {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        date,
    };

    let work = sign_out - sign_in;
    if work < Duration::zero() {
        return DayTallyResult {
            outcome: DayOutcome::Rejected(negative_duration()),
            lunch_anomaly: None,
        };
    }

    let mut lunch = punches.lunch_duration();
    let mut lunch_anomaly = None;
    if lunch < Duration::zero() {
        lunch = Duration::zero();
        lunch_anomaly = Some(Anomaly::NegativeLunch {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            date,
        });
    }

    let worked = work - lunch;
    let outcome = if worked < Duration::zero() {
        DayOutcome::Rejected(negative_duration())
    } else {
        DayOutcome::Tallied(DailyTally {
            person: person.clone(),
            date,
            worked,
        })
    };

    DayTallyResult {
        outcome,
        lunch_anomaly,
    }
}
