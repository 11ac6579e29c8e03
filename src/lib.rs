//! Dynamic Pomodoro - a work/break interval timer
//!
//! Sessions are made of a configurable list of work phases followed by a
//! break. Between phases the user confirms they stayed focused, and after the
//! last phase they may extend work a bounded number of times. Confirmations
//! time out to a default answer. All state changes go through one dispatcher
//! task that owns the timer exclusively.

pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Cli, TimerConfig};
pub use events::{Command, Event};
pub use state::{AppState, Machine, Mode, Snapshot};
pub use api::create_router;
pub use tasks::Dispatcher;
pub use utils::signals::shutdown_signal;
