//! Weekly worked-hours and payroll aggregation over a time-clock log
//!
//! This crate records Sign In, Sign Out and lunch-break punches into an
//! append-only CSV log, and turns that log into per-person weekly totals of
//! worked hours and pay at each person's configured hourly rate.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod event_log;
pub mod models;
pub mod notify;
pub mod store;
pub mod submission;
