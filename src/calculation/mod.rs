//! Payroll calculation for the timesheet payroll engine.
//!
//! This module contains the aggregation pass that turns a validated event
//! log into weekly worked hours and payments: per-day punch collection,
//! Monday-start week bucketing, and case-insensitive hourly rate lookup.

mod aggregate;
mod day_punches;
mod rate_lookup;
mod week_bucket;

pub use aggregate::{aggregate, daily_tallies, summarize};
pub use day_punches::{tally_day, DayOutcome, DayPunches, DayTallyResult};
pub use rate_lookup::{lookup_rate, RateLookupResult, DEFAULT_HOURLY_RATE};
pub use week_bucket::{week_label, week_start};
