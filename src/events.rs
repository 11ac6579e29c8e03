//! Messages exchanged between the dispatcher, its event sources and its sinks.
//!
//! Everything that can mutate the timer enters the dispatcher as an [`Event`]
//! through one ordered channel. Everything the timer wants done in the outside
//! world leaves it as an [`Effect`].

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::{
    error::CommandError,
    state::Snapshot,
};

/// Identifies one confirmation request. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationToken(pub u64);

impl fmt::Display for ConfirmationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The options a confirmation prompt can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmOption {
    Yes,
    No,
}

impl ConfirmOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmOption::Yes => "yes",
            ConfirmOption::No => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfirmOption::Yes => "Yes",
            ConfirmOption::No => "No",
        }
    }
}

impl fmt::Display for ConfirmOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfirmOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(ConfirmOption::Yes),
            "no" => Ok(ConfirmOption::No),
            other => Err(format!("unknown option '{other}'")),
        }
    }
}

/// Which question a confirmation asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    FocusCheck,
    Snooze,
}

/// A prompt handed to the confirmation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationRequest {
    pub token: ConfirmationToken,
    pub kind: PromptKind,
    pub title: String,
    pub body: String,
    pub options: Vec<ConfirmOption>,
    pub default: ConfirmOption,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl ConfirmationRequest {
    pub fn offers(&self, option: ConfirmOption) -> bool {
        self.options.contains(&option)
    }
}

/// How an answer came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Explicit,
    Timeout,
}

/// The one answer delivered for a confirmation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationAnswer {
    pub token: ConfirmationToken,
    pub option: ConfirmOption,
    pub resolution: Resolution,
}

/// User commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Toggle,
    Stop,
    SelectSession(usize),
    SelectPhase(usize),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Toggle => "toggle",
            Command::Stop => "stop",
            Command::SelectSession(_) => "select-session",
            Command::SelectPhase(_) => "select-phase",
        }
    }
}

pub type CommandReply = oneshot::Sender<Result<Snapshot, CommandError>>;

/// Items of the dispatcher's single ordered queue.
#[derive(Debug)]
pub enum Event {
    /// One second elapsed on the ticker of the given generation.
    Tick(u64),
    Command {
        command: Command,
        reply: Option<CommandReply>,
    },
    Answer(ConfirmationAnswer),
    Shutdown,
}

impl Event {
    /// A command whose outcome nobody waits for.
    pub fn command(command: Command) -> Self {
        Event::Command { command, reply: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Short notification sound (phase end, next session).
    Chime,
    /// Break sound.
    Gong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub body: String,
    pub timeout: Duration,
}

impl Banner {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn lasting(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outbound work requested by the progression machine. All fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PlayTone(Tone),
    Banner(Banner),
    Confirm(ConfirmationRequest),
    /// The token is no longer wanted; drop its prompt and timeout.
    Retire(ConfirmationToken),
    /// Freeze the token's timeout countdown.
    HoldConfirmation(ConfirmationToken),
    /// Continue the token's timeout countdown.
    ReleaseConfirmation(ConfirmationToken),
}

mod duration_secs {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }
}
