//! Core data models for the timesheet payroll engine.
//!
//! This module contains the domain models shared by the event log, the
//! aggregator, the store and the HTTP API.

mod action;
mod event;
mod raw_row;
mod summary;

pub use action::Action;
pub use event::{PersonKey, TimeEvent};
pub use raw_row::{split_legacy_name, LegacyRow, RawRow};
pub use summary::{
    duration_to_hours, Anomaly, DailyTally, PayrollReport, RateSource, WeeklySummaryRow,
};
