//! API Module
//!
//! HTTP API layer for the web service.
//! Each submodule handles endpoints for one step of the portability flow.

pub mod error;
pub mod health;
pub mod import_setup;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::ImportSetupService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub import_setup: Arc<ImportSetupService>,
    /// Name of the cookie carrying the job token
    pub id_cookie: Arc<str>,
    /// Registered (service, data type) pairs, reported by the health check
    pub capabilities: usize,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Import authorization
        .route("/_/importSetup", get(import_setup::import_setup))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
