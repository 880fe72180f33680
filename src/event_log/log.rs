//! The in-memory event log.

use chrono::NaiveDate;

use crate::models::{Action, PersonKey, TimeEvent};

/// A read-only snapshot of validated punches.
///
/// Events are kept sorted by first name, last name and timestamp. The sort
/// is stable, so punches with identical timestamps keep their log order.
///
/// # Example
///
/// ```
/// use timesheet_payroll::event_log::EventLog;
/// use timesheet_payroll::models::{Action, PersonKey, TimeEvent};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let punch = |action, h| TimeEvent {
///     person: PersonKey::new("Jane", "Doe"),
///     action,
///     date,
///     time: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
///     source_ip: None,
/// };
///
/// let log = EventLog::new(vec![punch(Action::SignOut, 17), punch(Action::SignIn, 8)]);
/// assert_eq!(log.events()[0].action, Action::SignIn);
/// assert!(log.has_punch(&PersonKey::new("Jane", "Doe"), date, Action::SignOut));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TimeEvent>,
}

impl EventLog {
    /// Builds a log from events in any order.
    pub fn new(mut events: Vec<TimeEvent>) -> Self {
        events.sort_by(|a, b| {
            a.person
                .cmp(&b.person)
                .then_with(|| a.timestamp().cmp(&b.timestamp()))
        });
        Self { events }
    }

    /// Returns the events in sorted order.
    pub fn events(&self) -> &[TimeEvent] {
        &self.events
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the events of one person, in timestamp order.
    pub fn for_person<'a>(&'a self, person: &'a PersonKey) -> impl Iterator<Item = &'a TimeEvent> {
        self.events.iter().filter(move |e| &e.person == person)
    }

    /// Returns true if the person has a punch of this kind on the date.
    pub fn has_punch(&self, person: &PersonKey, date: NaiveDate, action: Action) -> bool {
        self.for_person(person)
            .any(|e| e.date == date && e.action == action)
    }
}
