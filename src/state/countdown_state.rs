//! Countdown state structure and phase derivation

use serde::{Deserialize, Serialize};

use super::TimeLeft;

/// Observable phase of a countdown instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The tick process is active and decrementing once per second
    Running,
    /// Ticking was cancelled with time still on the clock
    Stopped,
    /// The countdown reached zero; nothing happens until a restart
    Expired,
}

/// Countdown state for a single payment-code expiry window
///
/// Invariant: `seconds_remaining <= total_duration_seconds`. The unsigned
/// fields make negative durations unrepresentable, so no input sanitizing
/// is needed past the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    /// Configured countdown length, fixed at creation
    pub total_duration_seconds: u64,
    /// Seconds left on the clock
    pub seconds_remaining: u64,
    /// Whether the tick process is currently active
    pub running: bool,
}

impl CountdownState {
    /// Create the initial state for a countdown of the given duration
    ///
    /// A zero-second countdown starts out expired and never runs.
    pub fn new(total_duration_seconds: u64) -> Self {
        Self {
            total_duration_seconds,
            seconds_remaining: total_duration_seconds,
            running: total_duration_seconds > 0,
        }
    }

    /// Derive the observable phase from the stored fields
    pub fn phase(&self) -> Phase {
        if self.seconds_remaining == 0 {
            Phase::Expired
        } else if self.running {
            Phase::Running
        } else {
            Phase::Stopped
        }
    }

    /// Decompose the remaining time into minutes and seconds
    pub fn time_left(&self) -> TimeLeft {
        TimeLeft::from_seconds(self.seconds_remaining)
    }

    /// Check if the countdown has reached its terminal zero state
    pub fn is_expired(&self) -> bool {
        self.seconds_remaining == 0
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new(0)
    }
}
