//! Error types for the timesheet payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! reading or writing the event log, and recording punches.
//!
//! Data problems found inside the log itself (bad timestamps, sign-outs
//! before sign-ins) are not errors; they are reported as
//! [`Anomaly`](crate::models::Anomaly) values alongside the summary.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the timesheet payroll engine.
///
/// # Example
///
/// ```
/// use timesheet_payroll::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The event log could not be read.
    #[error("Failed to read event log '{path}': {message}")]
    StoreRead {
        /// The path of the event log file.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// The event log could not be written.
    #[error("Failed to write event log '{path}': {message}")]
    StoreWrite {
        /// The path of the event log file.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// A punch submission was rejected before reaching the log.
    #[error("Invalid submission field '{field}': {message}")]
    InvalidSubmission {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The person already has this punch recorded for the day.
    #[error("{first_name} {last_name} already recorded '{action}' on {date}")]
    DuplicatePunch {
        /// First name of the person.
        first_name: String,
        /// Last name of the person.
        last_name: String,
        /// Label of the duplicated action.
        action: String,
        /// The day the punch was already recorded on.
        date: NaiveDate,
    },

    /// An action label did not match any known punch.
    #[error("Unknown action: {value}")]
    UnknownAction {
        /// The label that could not be parsed.
        value: String,
    },

    /// The notifier could not deliver a message.
    #[error("Notification failed: {message}")]
    NotificationFailed {
        /// A description of the delivery failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
