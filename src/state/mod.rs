//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod countdown_state;
pub mod time_left;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{CountdownState, Phase};
pub use time_left::TimeLeft;
