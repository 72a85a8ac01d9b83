//! Payment Countdown - A state-managed HTTP server driving the payment-code
//! expiry countdown
//!
//! This is the main entry point for the payment-countdown application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use payment_countdown::{api::create_router, config::Config, state::AppState, utils::shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "payment_countdown={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting payment-countdown server v1.0.0");
    info!(
        "Configuration: host={}, port={}, duration={}s",
        config.host, config.port, config.duration
    );

    // Create application state; the countdown starts ticking immediately
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.duration,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /stop    - Stop the countdown");
    info!("  POST /restart - Restart the countdown at the full duration");
    info!("  GET  /status  - Current phase, time left and expiry deadline");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown; dropping the state tears down the ticker
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
