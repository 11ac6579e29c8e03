//! Error types for the timer library.

use std::path::PathBuf;
use thiserror::Error;

use crate::state::Mode;

/// Startup configuration failures. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file '{path}' is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A user command the progression machine refused. State is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("timer is already running ({0})")]
    AlreadyRunning(Mode),

    #[error("work cannot be started during a break")]
    OnBreak,

    #[error("nothing to pause or resume while {0}")]
    NotActive(Mode),

    #[error("timer is already paused")]
    AlreadyPaused,

    #[error("timer is not paused")]
    NotPaused,

    #[error("all sessions are complete")]
    Completed,

    #[error("session {index} is out of range (0..{count})")]
    SessionOutOfRange { index: usize, count: usize },

    #[error("phase {index} is out of range (0..{count})")]
    PhaseOutOfRange { index: usize, count: usize },
}

impl CommandError {
    /// Whether the rejection was caused by a bad selection index.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            CommandError::SessionOutOfRange { .. } | CommandError::PhaseOutOfRange { .. }
        )
    }
}

/// Failures when submitting an explicit confirmation answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// The token was never issued, or it has already been resolved or retired.
    #[error("confirmation {0} is not outstanding")]
    UnknownToken(u64),

    #[error("'{option}' is not a valid answer for confirmation {token}")]
    InvalidOption { token: u64, option: String },

    #[error("dispatcher is no longer running")]
    DispatcherClosed,
}

/// Failures when routing a command through the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Rejected(#[from] CommandError),

    #[error("dispatcher is no longer running")]
    Closed,
}
