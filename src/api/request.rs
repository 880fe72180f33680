//! Request types for the timesheet payroll API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Action;

/// Request body for the `POST /punches` endpoint.
///
/// When `timestamp` is omitted the server's local time is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// First name as typed.
    pub first_name: String,
    /// Last name as typed.
    pub last_name: String,
    /// The punch, in snake_case (`sign_in`, `lunch_out`, ...).
    pub action: Action,
    /// Local time of the punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}
