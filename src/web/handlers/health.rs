//! # Health Handlers
//!
//! `GET /admin/health` runs a full evaluation for authenticated admins.
//! `GET /health/live` is an unauthenticated liveness probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AdminContext;
use crate::health::HealthReport;
use crate::web::errors::ApiResult;
use crate::web::extractors::HistoryFlag;
use crate::web::state::AppState;

/// Basic liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub timestamp: String,
}

/// Admin health endpoint: GET /admin/health
///
/// 200 with the report when healthy, 503 with the report when unhealthy.
pub async fn admin_health(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    HistoryFlag(include_history): HistoryFlag,
) -> ApiResult<(StatusCode, Json<HealthReport>)> {
    debug!(include_history = include_history, "Admin health requested");

    let report = state.service.get_admin_health(&ctx, include_history).await?;

    let status_code = if report.status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status_code, Json(report)))
}

/// Liveness probe: GET /health/live
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
