//! State management module
//!
//! This module contains the timer state and the progression machine that owns it.

pub mod machine;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use machine::Machine;
pub use app_state::AppState;
pub use timer_state::{format_mmss, Mode, Snapshot, TimerState};
