//! Outbound collaborators of the timer
//!
//! Display sinks, tones and banners, confirmation prompts, and the probes for
//! the desktop tools behind them.

pub mod confirmation;
pub mod display;
pub mod notifier;
pub mod system;

// Re-export main types
pub use confirmation::{ConfirmationService, PendingPrompt, PromptBroker};
pub use display::{DisplaySink, LogDisplay, WatchDisplay};
pub use notifier::{DesktopNotifier, LogNotifier, Notifier};
pub use system::*;
