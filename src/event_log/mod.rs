//! The event log model.
//!
//! This module turns rows loaded from the durable store into a validated,
//! sorted [`EventLog`]. Rows that cannot be used (no identity, unknown
//! action, unparseable date or time) are left out and reported as
//! [`Anomaly`](crate::models::Anomaly) values.
//!
//! # Example
//!
//! ```
//! use timesheet_payroll::event_log::validate_rows;
//! use timesheet_payroll::models::RawRow;
//!
//! let validation = validate_rows(&[RawRow::default()]);
//! assert!(validation.log.is_empty());
//! assert_eq!(validation.anomalies.len(), 1);
//! ```

mod log;
mod timestamp;
mod validate;

pub use log::EventLog;
pub use timestamp::{parse_date, parse_time, DATE_FORMAT, SUPPORTED_YEARS, TIME_FORMAT};
pub use validate::{validate_row, validate_rows, LogValidation};
