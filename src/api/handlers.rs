//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::info;

use crate::state::AppState;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /stop - Stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let countdown = state.stop_countdown();
    info!("Stop endpoint called - countdown frozen");
    Json(ApiResponse::stopped(
        "Countdown stopped".to_string(),
        countdown,
    ))
}

/// Handle POST /restart - Restart the countdown at the full duration
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let countdown = state.restart_countdown();
    info!("Restart endpoint called - countdown reset to full duration");
    Json(ApiResponse::running(
        "Countdown restarted".to_string(),
        countdown,
    ))
}

/// Handle GET /status - Return the current countdown status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.countdown_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        phase: countdown.phase(),
        time_left: countdown.time_left(),
        expires_at: state.expiry_deadline(),
        countdown,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
