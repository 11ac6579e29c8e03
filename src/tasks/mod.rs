//! Background tasks module
//!
//! This module contains the dispatcher that owns the timer and the ticker that drives it.

pub mod dispatcher;
pub mod ticker;

// Re-export main types
pub use dispatcher::Dispatcher;
pub use ticker::Ticker;
