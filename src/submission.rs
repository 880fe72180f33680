//! Recording punches.
//!
//! [`PunchRecorder`] is the append path: it validates a submission, refuses
//! a second sign-in or sign-out on the same day, appends the row and sends
//! a notification.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDateTime};
use tracing::{info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::event_log::{validate_rows, DATE_FORMAT, SUPPORTED_YEARS, TIME_FORMAT};
use crate::models::{Action, PersonKey, RawRow, TimeEvent};
use crate::notify::{Notification, Notifier};
use crate::store::EventStore;

/// A punch as submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchSubmission {
    /// First name as typed.
    pub first_name: String,
    /// Last name as typed.
    pub last_name: String,
    /// The punch.
    pub action: Action,
    /// Local time of the punch, second precision.
    pub timestamp: NaiveDateTime,
    /// Submitting address, if known.
    pub source_ip: Option<String>,
}

/// Appends punches to an event store.
///
/// The read, duplicate check and append run under one lock, so two
/// submissions through the same recorder never interleave.
pub struct PunchRecorder {
    store: Arc<dyn EventStore>,
    notifier: Arc<dyn Notifier>,
    organization: String,
    write_lock: Mutex<()>,
}

fn required(field: &str, value: &str) -> PayrollResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PayrollError::InvalidSubmission {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

fn supported_timestamp(timestamp: NaiveDateTime) -> PayrollResult<NaiveDateTime> {
    if !SUPPORTED_YEARS.contains(&timestamp.year()) {
        return Err(PayrollError::InvalidSubmission {
            field: "timestamp".to_string(),
            message: format!(
                "year must be between {} and {}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
        });
    }
    Ok(timestamp)
}

impl PunchRecorder {
    /// Creates a recorder.
    pub fn new(
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            organization: organization.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Records one punch and returns the stored event.
    ///
    /// # Errors
    ///
    /// - `InvalidSubmission` if a name is blank or the year is outside
    ///   four digits
    /// - `DuplicatePunch` if a sign-in or sign-out already exists for the
    ///   person on that date
    /// - store errors are propagated unchanged
    ///
    /// A failed notification is logged and does not fail the call.
    pub fn record(&self, submission: PunchSubmission) -> PayrollResult<TimeEvent> {
        let person = PersonKey::new(
            required("first_name", &submission.first_name)?,
            required("last_name", &submission.last_name)?,
        );
        let timestamp = supported_timestamp(submission.timestamp)?;
        let event = TimeEvent {
            person,
            action: submission.action,
            date: timestamp.date(),
            time: timestamp.time(),
            source_ip: submission.source_ip.filter(|ip| !ip.trim().is_empty()),
        };

        {
            let _guard = self
                .write_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if event.action.is_once_per_day() {
                let log = validate_rows(&self.store.load_rows()?).log;
                if log.has_punch(&event.person, event.date, event.action) {
                    warn!(
                        person = %event.person,
                        action = %event.action,
                        date = %event.date,
                        "Duplicate punch rejected"
                    );
                    return Err(PayrollError::DuplicatePunch {
                        first_name: event.person.first_name.clone(),
                        last_name: event.person.last_name.clone(),
                        action: event.action.label().to_string(),
                        date: event.date,
                    });
                }
            }

            self.store.append(RawRow::from(&event))?;
        }

        info!(
            person = %event.person,
            action = %event.action,
            timestamp = %event.timestamp(),
            "Punch recorded"
        );

        if let Err(err) = self.notifier.notify(&self.notification_for(&event)) {
            warn!(error = %err, person = %event.person, "Notification failed");
        }

        Ok(event)
    }

    fn notification_for(&self, event: &TimeEvent) -> Notification {
        Notification {
            subject: format!("{}: {} recorded", self.organization, event.action),
            body: format!(
                "{} recorded {} at {} on {}.",
                event.person,
                event.action,
                event.time.format(TIME_FORMAT),
                event.date.format(DATE_FORMAT)
            ),
        }
    }
}
