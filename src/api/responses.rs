//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownState, Phase, TimeLeft};

/// API response structure for countdown control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: CountdownState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, countdown: CountdownState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// Create a response for a running countdown
    pub fn running(message: String, countdown: CountdownState) -> Self {
        Self::new("running".to_string(), message, countdown)
    }

    /// Create a response for a stopped countdown
    pub fn stopped(message: String, countdown: CountdownState) -> Self {
        Self::new("stopped".to_string(), message, countdown)
    }
}

/// Status response with the fields the payment screen renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: CountdownState,
    pub phase: Phase,
    pub time_left: TimeLeft,
    /// UTC instant the payment code stops being payable, while running
    pub expires_at: Option<DateTime<Utc>>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}
