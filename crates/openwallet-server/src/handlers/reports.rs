//! Spending report handler

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::{AppError, AppState};
use openwallet_core::models::{ReportRequest, ReportResponse};
use openwallet_core::report::generate_report;

/// POST /api/report - Generate a spending report over a date range
///
/// Responds 404 when no transactions match the requested range (NoData),
/// 503 when no model backend is configured.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let client = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Model backend not configured"))?;

    let response = generate_report(&state.db, client, &request).await?;
    Ok(Json(response))
}
