//! Validation of stored rows into time events.

use tracing::warn;

use crate::models::{Action, Anomaly, PersonKey, RawRow, TimeEvent};

use super::EventLog;
use super::timestamp::{parse_date, parse_time};

/// The outcome of validating a set of stored rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogValidation {
    /// Events built from the valid rows.
    pub log: EventLog,
    /// One entry per excluded row.
    pub anomalies: Vec<Anomaly>,
}

/// Validates stored rows into an [`EventLog`].
///
/// A row is excluded (and reported) when its first or last name is blank,
/// when its action is unknown, or when its date or time cannot be parsed.
/// Names are trimmed; their case is kept. The IP field is informational and
/// never causes exclusion.
///
/// # Example
///
/// ```
/// use timesheet_payroll::event_log::validate_rows;
/// use timesheet_payroll::models::{Anomaly, RawRow};
///
/// let rows = vec![
///     RawRow {
///         first_name: "Jane".into(),
///         last_name: "Doe".into(),
///         action: "Sign In".into(),
///         date: "2024-06-03".into(),
///         time: "08:00:00 AM".into(),
///         ip: String::new(),
///     },
///     RawRow {
///         first_name: "Jane".into(),
///         last_name: "Doe".into(),
///         action: "Sign Out".into(),
///         date: "2024-13-40".into(),
///         time: "05:00:00 PM".into(),
///         ip: String::new(),
///     },
/// ];
///
/// let validation = validate_rows(&rows);
/// assert_eq!(validation.log.len(), 1);
/// assert!(matches!(validation.anomalies[0], Anomaly::MalformedTimestamp { row: 2, .. }));
/// ```
pub fn validate_rows(rows: &[RawRow]) -> LogValidation {
    let mut events = Vec::with_capacity(rows.len());
    let mut anomalies = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(index + 1, row) {
            Ok(event) => events.push(event),
            Err(anomaly) => {
                warn!(row = index + 1, kind = anomaly.code(), "Skipping log row");
                anomalies.push(anomaly);
            }
        }
    }

    LogValidation {
        log: EventLog::new(events),
        anomalies,
    }
}

/// Validates a single row; `row_number` is its 1-based position.
pub fn validate_row(row_number: usize, row: &RawRow) -> Result<TimeEvent, Anomaly> {
    let first_name = row.first_name.trim();
    let last_name = row.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(Anomaly::MissingIdentity { row: row_number });
    }

    let action: Action = row.action.parse().map_err(|_| Anomaly::UnknownAction {
        row: row_number,
        action: row.action.clone(),
    })?;

    let malformed = || Anomaly::MalformedTimestamp {
        row: row_number,
        date: row.date.clone(),
        time: row.time.clone(),
    };
    let date = parse_date(&row.date).ok_or_else(malformed)?;
    let time = parse_time(&row.time).ok_or_else(malformed)?;

    let ip = row.ip.trim();
    Ok(TimeEvent {
        person: PersonKey::new(first_name, last_name),
        action,
        date,
        time,
        source_ip: (!ip.is_empty()).then(|| ip.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn row(first: &str, last: &str, action: &str, date: &str, time: &str) -> RawRow {
        RawRow {
            first_name: first.to_string(),
            last_name: last.to_string(),
            action: action.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            ip: String::new(),
        }
    }

    #[test]
    fn test_valid_row_becomes_event() {
        let mut raw = row(" Jane ", "Doe", "Sign In", "2024-06-03", "08:00:00 AM");
        raw.ip = "192.168.1.20".to_string();

        let event = validate_row(1, &raw).unwrap();
        assert_eq!(event.person, PersonKey::new("Jane", "Doe"));
        assert_eq!(event.action, Action::SignIn);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(event.time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(event.source_ip.as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn test_missing_identity_is_excluded() {
        let result = validate_row(4, &row("Jane", "  ", "Sign In", "2024-06-03", "08:00"));
        assert_eq!(result, Err(Anomaly::MissingIdentity { row: 4 }));

        let result = validate_row(5, &row("", "Doe", "Sign In", "2024-06-03", "08:00"));
        assert_eq!(result, Err(Anomaly::MissingIdentity { row: 5 }));
    }

    #[test]
    fn test_unknown_action_is_excluded() {
        let result = validate_row(2, &row("Jane", "Doe", "Nap", "2024-06-03", "08:00"));
        assert_eq!(
            result,
            Err(Anomaly::UnknownAction {
                row: 2,
                action: "Nap".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_date_reports_row() {
        let result = validate_row(7, &row("Jane", "Doe", "Sign In", "2024-13-40", "08:00:00 AM"));
        assert_eq!(
            result,
            Err(Anomaly::MalformedTimestamp {
                row: 7,
                date: "2024-13-40".to_string(),
                time: "08:00:00 AM".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_time_reports_row() {
        let result = validate_row(1, &row("Jane", "Doe", "Sign In", "2024-06-03", "late"));
        assert!(matches!(result, Err(Anomaly::MalformedTimestamp { row: 1, .. })));
    }

    #[test]
    fn test_bad_rows_do_not_affect_the_rest() {
        let rows = vec![
            row("Jane", "Doe", "Sign In", "2024-06-03", "08:00:00 AM"),
            row("Jane", "Doe", "Sign Out", "2024-13-40", "05:00:00 PM"),
            row("", "", "Sign In", "2024-06-03", "08:00:00 AM"),
            row("Jane", "Doe", "Sign Out", "2024-06-03", "05:00:00 PM"),
        ];

        let validation = validate_rows(&rows);
        assert_eq!(validation.log.len(), 2);
        assert_eq!(validation.anomalies.len(), 2);
        assert!(matches!(
            validation.anomalies[0],
            Anomaly::MalformedTimestamp { row: 2, .. }
        ));
        assert_eq!(validation.anomalies[1], Anomaly::MissingIdentity { row: 3 });
    }
}
