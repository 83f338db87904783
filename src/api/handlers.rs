//! HTTP request handlers for the fleet payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ComplianceReport, Dashboard, FinancialReport, RankedDriver};
use crate::error::EngineError;
use crate::ingestion::{ImportFile, ImportOutcome};
use crate::models::{BranchFinancialConfig, ConfigEdit, LogisticsEntry, Period};

use super::request::{FilterQuery, ImportRequest};
use super::response::{ApiError, ApiErrorResponse, SummaryResponse};
use super::state::AppState;

/// File name suggested for exports.
const EXPORT_FILE_NAME: &str = "relatorio_logistica.csv";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/imports", post(import_handler))
        .route(
            "/entries",
            get(list_entries_handler).delete(clear_entries_handler),
        )
        .route("/entries/export", get(export_handler))
        .route("/periods", get(periods_handler))
        .route("/configs", get(list_configs_handler))
        .route("/configs/:branch", put(update_config_handler))
        .route("/configs/:branch/suggest", post(suggest_config_handler))
        .route("/reports/financial", get(financial_report_handler))
        .route("/reports/dashboard", get(dashboard_handler))
        .route("/reports/ranking", get(ranking_handler))
        .route("/reports/compliance", get(compliance_handler))
        .route("/reports/summary", get(summary_handler))
        .route(
            "/logo",
            get(get_logo_handler)
                .put(put_logo_handler)
                .delete(delete_logo_handler),
        )
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

/// Logs a failed request and converts its error into a response.
fn reject(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /imports.
///
/// Returns 201 when at least one entry was added and 422 when the batch
/// held no valid row or only duplicates. A file that cannot be decoded is a
/// 400 and nothing from the batch is kept.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing import request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let period = Period::parse(&request.period).map_err(|e| reject(correlation_id, e))?;
    let files: Vec<ImportFile> = request.files.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    let report = state
        .ledger()
        .lock()
        .await
        .import(&files, &period)
        .map_err(|e| reject(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        period = %period,
        files = files.len(),
        outcome = ?report.outcome,
        new_records = report.new_records,
        duplicates = report.duplicates,
        duration_us = start_time.elapsed().as_micros(),
        "Import completed"
    );

    let status = match report.outcome {
        ImportOutcome::Imported => StatusCode::CREATED,
        ImportOutcome::NoValidData | ImportOutcome::AllDuplicates => StatusCode::UNPROCESSABLE_ENTITY,
    };
    Ok(json_response(status, report))
}

/// Handler for GET /entries.
async fn list_entries_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<LogisticsEntry>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    let entries = state.ledger().lock().await.entries(&filter);
    info!(correlation_id = %correlation_id, entries = entries.len(), "Entries listed");
    Ok(Json(entries))
}

/// Handler for DELETE /entries.
async fn clear_entries_handler(State(state): State<AppState>) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .ledger()
        .lock()
        .await
        .clear()
        .map_err(|e| reject(correlation_id, e))?;
    info!(correlation_id = %correlation_id, "Entries cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /entries/export.
async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    let text = state
        .ledger()
        .lock()
        .await
        .export(&filter)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, bytes = text.len(), "Entries exported");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        text,
    )
        .into_response())
}

/// Handler for GET /periods.
async fn periods_handler(State(state): State<AppState>) -> Json<Vec<Period>> {
    Json(state.ledger().lock().await.periods())
}

/// Handler for GET /configs.
async fn list_configs_handler(State(state): State<AppState>) -> Json<Vec<BranchFinancialConfig>> {
    Json(state.ledger().lock().await.configs().to_vec())
}

/// Handler for PUT /configs/:branch.
async fn update_config_handler(
    State(state): State<AppState>,
    Path(branch): Path<String>,
    payload: Result<Json<ConfigEdit>, JsonRejection>,
) -> Result<Json<BranchFinancialConfig>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(edit) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let config = state
        .ledger()
        .lock()
        .await
        .edit_config(&branch, edit)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, branch = %branch, "Configuration edited");
    Ok(Json(config))
}

/// Handler for POST /configs/:branch/suggest.
async fn suggest_config_handler(
    State(state): State<AppState>,
    Path(branch): Path<String>,
) -> Result<Json<BranchFinancialConfig>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let config = state
        .ledger()
        .lock()
        .await
        .suggest(&branch)
        .map_err(|e| reject(correlation_id, e))?;

    info!(correlation_id = %correlation_id, branch = %branch, "Rates suggested");
    Ok(Json(config))
}

/// Handler for GET /reports/financial.
async fn financial_report_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FinancialReport>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;

    let start_time = Instant::now();
    let report = state.ledger().lock().await.financial_report(&filter);
    info!(
        correlation_id = %correlation_id,
        branches = report.branches.len(),
        total_cost = %report.total_cost,
        duration_us = start_time.elapsed().as_micros(),
        "Financial report computed"
    );
    Ok(Json(report))
}

/// Handler for GET /reports/dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Dashboard>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    let dashboard = state.ledger().lock().await.dashboard(&filter);
    info!(
        correlation_id = %correlation_id,
        total_cost = %dashboard.kpis.total_cost,
        "Dashboard computed"
    );
    Ok(Json(dashboard))
}

/// Handler for GET /reports/ranking.
async fn ranking_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<RankedDriver>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    Ok(Json(state.ledger().lock().await.ranking(&filter)))
}

/// Handler for GET /reports/compliance.
async fn compliance_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ComplianceReport>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    let report = state.ledger().lock().await.compliance(&filter);
    info!(
        correlation_id = %correlation_id,
        flags = report.flag_count(),
        "Compliance report computed"
    );
    Ok(Json(report))
}

/// Handler for GET /reports/summary.
async fn summary_handler(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SummaryResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let filter = query.into_filter().map_err(|e| reject(correlation_id, e))?;
    let summary = state.ledger().lock().await.summary(&filter);
    Ok(Json(SummaryResponse {
        summary,
        generated_at: Utc::now(),
    }))
}

/// Handler for GET /logo.
async fn get_logo_handler(State(state): State<AppState>) -> Result<Response, ApiErrorResponse> {
    match state.ledger().lock().await.logo() {
        Some(logo) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            logo,
        )
            .into_response()),
        None => Err(ApiErrorResponse::new(
            StatusCode::NOT_FOUND,
            ApiError::new("LOGO_NOT_FOUND", "No logo has been uploaded"),
        )),
    }
}

/// Handler for PUT /logo.
async fn put_logo_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    if body.is_empty() {
        warn!(correlation_id = %correlation_id, "Empty logo upload");
        return Err(ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", "Logo body must not be empty"),
        ));
    }

    state
        .ledger()
        .lock()
        .await
        .set_logo(&body)
        .map_err(|e| reject(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /logo.
async fn delete_logo_handler(State(state): State<AppState>) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .ledger()
        .lock()
        .await
        .remove_logo()
        .map_err(|e| reject(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}
