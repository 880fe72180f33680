//! HTTP API module for the timesheet payroll engine.
//!
//! This module provides the REST endpoints for recording punches, viewing
//! the raw event log, and computing the weekly payroll summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PunchRequest;
pub use response::{ApiError, ApiErrorResponse, EventsResponse, LogEntry, PunchResponse};
pub use state::AppState;
