//! Response types for the timesheet payroll API.
//!
//! This module defines the success bodies, the error response structures,
//! and the mapping from [`PayrollError`] to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::models::{Anomaly, RawRow, TimeEvent};

/// Body returned after a punch is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchResponse {
    /// Confirmation shown to the person punching.
    pub message: String,
    /// The stored event.
    pub event: TimeEvent,
}

/// One row of the raw log, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// First name as stored.
    pub first_name: String,
    /// Last name as stored.
    pub last_name: String,
    /// Action label as stored.
    pub action: String,
    /// Date as stored.
    pub date: String,
    /// Time as stored.
    pub time: String,
    /// Submitting address as stored.
    pub ip: String,
}

impl From<RawRow> for LogEntry {
    fn from(row: RawRow) -> Self {
        Self {
            first_name: row.first_name,
            last_name: row.last_name,
            action: row.action,
            date: row.date,
            time: row.time,
            ip: row.ip,
        }
    }
}

/// Body of `GET /events`: every stored row plus the rows that failed
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    /// All rows, unfiltered, in stored order.
    pub rows: Vec<LogEntry>,
    /// Rows that are excluded from the payroll summary.
    pub anomalies: Vec<Anomaly>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an internal error response.
    pub fn internal_error(details: impl Into<String>) -> Self {
        Self::with_details("INTERNAL_ERROR", "Internal server error", details)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::InvalidSubmission { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            PayrollError::UnknownAction { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            PayrollError::DuplicatePunch { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_PUNCH",
                    message,
                    "Sign In and Sign Out can be recorded once per day",
                ),
            },
            PayrollError::StoreRead { .. } | PayrollError::StoreWrite { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Event log unavailable", message),
            },
            PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::NotificationFailed { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::internal_error(message),
            },
        }
    }
}
