//! Health Check API Handler
//!
//! Liveness endpoint for monitoring.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Number of (service, data type) pairs this instance can start import authorization for
    pub capabilities: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        capabilities: state.capabilities,
    })
}
