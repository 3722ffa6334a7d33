//! HTTP request handlers for the flexible working hours API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    abnormal_reports, build_history, calculate_expected_clock_out, calculate_leave_strategy,
    calculate_remaining_time, describe_rules, today_summary,
};
use crate::error::EngineError;

use super::request::{ClockInRequest, LeaveStrategyRequest, RemainingTimeRequest, ReportRequest};
use super::response::{ApiError, ApiErrorResponse, ReportResponse, RulesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rules", get(rules_handler))
        .route("/expected-clock-out", post(expected_clock_out_handler))
        .route("/remaining-time", post(remaining_time_handler))
        .route("/leave-strategy", post(leave_strategy_handler))
        .route("/attendance/report", post(report_handler))
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

/// Turns a body extraction failure into an `ApiError` response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Rejected request input"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Handler for GET /rules.
///
/// Returns the active policy and its rendering in the configured locale.
async fn rules_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    let response = RulesResponse {
        rules: config.rules().clone(),
        description: describe_rules(config.rules(), config.settings().locale),
    };
    json_response(StatusCode::OK, response)
}

/// Handler for POST /expected-clock-out.
async fn expected_clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing expected clock-out request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let clock_in = match request.clock_in() {
        Ok(clock_in) => clock_in,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let result = calculate_expected_clock_out(clock_in, state.config().rules());
    info!(
        correlation_id = %correlation_id,
        rule = ?result.rule,
        expected = %result.expected_time_display(),
        "Expected clock-out calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /remaining-time.
///
/// The caller supplies its own current time so the result is reproducible.
async fn remaining_time_handler(
    State(state): State<AppState>,
    payload: Result<Json<RemainingTimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing remaining time request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let clock_in = match request.clock_in() {
        Ok(clock_in) => clock_in,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let result = calculate_remaining_time(clock_in, &request.now, state.config().rules());
    info!(
        correlation_id = %correlation_id,
        remaining_minutes = result.remaining_minutes,
        overtime_minutes = result.overtime_minutes,
        "Remaining time calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /leave-strategy.
async fn leave_strategy_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveStrategyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave strategy request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let (punch_in, punch_out) = match request.punches() {
        Ok(punches) => punches,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let result = calculate_leave_strategy(punch_in, punch_out, state.config().rules());
    info!(
        correlation_id = %correlation_id,
        total_leave_minutes = result.total_leave_minutes,
        segments = result.segments.len(),
        wasted_minutes = result.wasted_minutes,
        "Leave strategy calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /attendance/report.
///
/// Builds today's summary, the full history and the abnormal-record list
/// from the raw records the attendance system returned.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let records = match request.records() {
        Ok(records) => records,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let config = state.config();
    let rules = config.rules();
    let locale = request.locale.unwrap_or(config.settings().locale);
    let search_days = request
        .search_days
        .unwrap_or(config.settings().abnormal_search_days);

    let response = ReportResponse {
        today: today_summary(&records, request.now, rules),
        history: build_history(&records, rules, locale),
        abnormal: abnormal_reports(&records, request.now.date(), search_days, rules, locale),
    };

    info!(
        correlation_id = %correlation_id,
        records = records.len(),
        abnormal = response.abnormal.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Attendance report completed"
    );
    json_response(StatusCode::OK, response)
}
