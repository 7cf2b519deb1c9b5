use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::error::ApiError;
use super::state::AppState;
use crate::model::{ReportRequest, ReportResponse};

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Renders the BBCode report for a submitted arrest.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let result = state.render(&request);
    tracing::info!(
        last_name = %request.arrestee.last_name,
        officer = %request.officer.name,
        bytes = result.len(),
        "generated arrest report"
    );
    Ok(Json(ReportResponse { result }))
}

/// Fallback for every non-POST method on the report route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
