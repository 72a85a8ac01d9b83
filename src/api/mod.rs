//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
///
/// CORS is left permissive: the consumer is the merchant dashboard running
/// in a browser on a different origin.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stop", post(stop_handler))
        .route("/restart", post(restart_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
