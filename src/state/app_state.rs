//! Main application state management

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::countdown::Countdown;

use super::CountdownState;

/// Main application state that owns the payment countdown
#[derive(Debug)]
pub struct AppState {
    /// The countdown driving the payment-code expiry screen
    pub countdown: Countdown,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last control action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState and start the countdown
    ///
    /// The countdown begins ticking immediately; the frontend restarts it
    /// whenever a fresh payment code is issued. Must be called from within a
    /// Tokio runtime.
    pub fn new(port: u16, host: String, duration_seconds: u64) -> Self {
        Self {
            countdown: Countdown::start(duration_seconds),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Stop the countdown and record the action
    pub fn stop_countdown(&self) -> CountdownState {
        info!("Stopping countdown");
        self.countdown.stop();
        self.record_action("stop");
        self.countdown.snapshot()
    }

    /// Restart the countdown at the full duration and record the action
    pub fn restart_countdown(&self) -> CountdownState {
        info!("Restarting countdown");
        self.countdown.restart();
        self.record_action("restart");
        self.countdown.snapshot()
    }

    /// Get the current countdown state
    pub fn countdown_state(&self) -> CountdownState {
        self.countdown.snapshot()
    }

    /// Instant the payment code stops being payable, while the clock runs
    pub fn expiry_deadline(&self) -> Option<DateTime<Utc>> {
        let state = self.countdown.snapshot();
        state
            .running
            .then(|| Utc::now() + chrono::Duration::seconds(state.seconds_remaining as i64))
    }

    /// Record the most recent control action and its timestamp
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
