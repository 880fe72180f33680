//! HTTP request handlers for the timesheet payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, Timelike};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::summarize;
use crate::error::PayrollResult;
use crate::event_log::{validate_rows, DATE_FORMAT, TIME_FORMAT};
use crate::submission::PunchSubmission;

use super::request::PunchRequest;
use super::response::{ApiError, ApiErrorResponse, EventsResponse, LogEntry, PunchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/punches", post(punch_handler))
        .route("/events", get(events_handler))
        .route("/summary", get(summary_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Runs synchronous store work on tokio's blocking thread pool.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiErrorResponse>
where
    F: FnOnce() -> PayrollResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(ApiErrorResponse::from),
        Err(err) => Err(ApiErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::internal_error(err.to_string()),
        }),
    }
}

fn rejection_error(correlation_id: &Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Returns the first address of `X-Forwarded-For`, if present.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Handler for POST /punches endpoint.
///
/// Records one punch and returns a confirmation message.
async fn punch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing punch request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(&correlation_id, rejection);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    // Default to the server's wall clock, whole seconds
    let timestamp = request.timestamp.unwrap_or_else(|| {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    });

    let submission = PunchSubmission {
        first_name: request.first_name,
        last_name: request.last_name,
        action: request.action,
        timestamp,
        source_ip: forwarded_ip(&headers),
    };

    // Record the punch
    match run_blocking(move || state.recorder().record(submission)).await {
        Ok(event) => {
            let message = format!(
                "{} recorded at {} on {}",
                event.action,
                event.time.format(TIME_FORMAT),
                event.date.format(DATE_FORMAT)
            );
            info!(correlation_id = %correlation_id, person = %event.person, "Punch accepted");
            json_response(StatusCode::CREATED, PunchResponse { message, event })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err.error.message,
                "Punch rejected"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /events endpoint.
///
/// Returns the raw log, unfiltered, with the validation anomalies.
async fn events_handler(State(state): State<AppState>) -> Response {
    let result = run_blocking(move || {
        let rows = state.store().load_rows()?;
        let anomalies = validate_rows(&rows).anomalies;
        let rows = rows.into_iter().map(LogEntry::from).collect();
        Ok(EventsResponse { rows, anomalies })
    })
    .await;

    match result {
        Ok(events) => json_response(StatusCode::OK, events),
        Err(err) => {
            warn!(error = %err.error.message, "Failed to load event log");
            error_response(err)
        }
    }
}

/// Handler for GET /summary endpoint.
///
/// Returns weekly worked hours and payments for everyone in the log.
async fn summary_handler(State(state): State<AppState>) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();

    // Reload the log and aggregate it
    let result = run_blocking(move || {
        let rows = state.store().load_rows()?;
        Ok(summarize(&rows, state.config().rates()))
    })
    .await;

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                rows = report.rows.len(),
                anomalies = report.anomalies.len(),
                total_payment = %report.total_payment(),
                duration_us = start_time.elapsed().as_micros(),
                "Summary computed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err.error.message,
                "Failed to compute summary"
            );
            error_response(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, RateTable, Settings, StoreSettings};
    use crate::models::PayrollReport;
    use crate::notify::DisabledNotifier;
    use crate::store::{CsvEventStore, EventStore};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn create_test_state(dir: &TempDir) -> AppState {
        let path = dir.path().join("timesheet.csv");
        let settings = Settings {
            organization: "NCTT LLC".to_string(),
            store: StoreSettings {
                data_file: path.clone(),
            },
            notifier: Default::default(),
        };
        let rates = RateTable::new(Decimal::from_str("35.0").unwrap());
        AppState::with_parts(
            ConfigLoader::from_parts(settings, rates),
            Arc::new(CsvEventStore::new(path)),
            Arc::new(DisabledNotifier),
        )
    }

    fn post_punch(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/punches")
            .header("Content-Type", "application/json")
            .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_forwarded_ip_takes_first_address() {
        let mut headers = HeaderMap::new();
        assert_eq!(forwarded_ip(&headers), None);
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(forwarded_ip(&headers), Some("203.0.113.9".to_string()));
    }

    #[tokio::test]
    async fn test_api_001_punch_returns_201() {
        let dir = TempDir::new().unwrap();
        let router = create_router(create_test_state(&dir));

        let body = r#"{"first_name":"Jane","last_name":"Doe","action":"sign_in","timestamp":"2024-06-03T08:00:00"}"#;
        let response = router.oneshot(post_punch(body.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: PunchResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.message, "Sign In recorded at 08:00:00 AM on 2024-06-03");
        assert_eq!(result.event.source_ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let dir = TempDir::new().unwrap();
        let router = create_router(create_test_state(&dir));

        let response = router
            .oneshot(post_punch("{ not json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_unknown_action_returns_400() {
        let dir = TempDir::new().unwrap();
        let router = create_router(create_test_state(&dir));

        let body = r#"{"first_name":"Jane","last_name":"Doe","action":"nap"}"#;
        let response = router.oneshot(post_punch(body.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_run_blocking_maps_panic_to_internal_error() {
        let result = run_blocking(|| -> PayrollResult<()> { panic!("worker failed") }).await;

        match result {
            Err(err) => {
                assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(err.error.code, "INTERNAL_ERROR");
            }
            Ok(()) => panic!("Expected an internal error"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_api_005_concurrent_punches_are_all_stored() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir);
        let router = create_router(state.clone());

        let mut handles = Vec::new();
        for i in 0..8 {
            let router = router.clone();
            let body = format!(
                r#"{{"first_name":"Worker{}","last_name":"Doe","action":"sign_in","timestamp":"2024-06-03T08:00:00"}}"#,
                i
            );
            handles.push(tokio::spawn(async move {
                router.oneshot(post_punch(body)).await.unwrap().status()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
        }

        assert_eq!(state.store().load_rows().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_api_004_summary_of_empty_log() {
        let dir = TempDir::new().unwrap();
        let router = create_router(create_test_state(&dir));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: PayrollReport = serde_json::from_slice(&body).unwrap();
        assert!(report.rows.is_empty());
        assert!(report.anomalies.is_empty());
    }
}
