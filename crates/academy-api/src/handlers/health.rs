//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use academy_service::dto::{HealthResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    // The in-memory store has no pool and is always available
    let db_healthy = match ctx.pool() {
        Some(pool) => pool.acquire().await.is_ok(),
        None => true,
    };

    let response = ReadinessResponse::ready(db_healthy, ctx.payment_gateway().is_some());
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
