//! Timer state structure and display snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{config::TimerConfig, events::ConfirmationToken};

/// What the timer is currently doing. Pausing is a separate flag on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Idle,
    Working,
    AwaitingFocusConfirmation,
    AwaitingSnoozeConfirmation,
    Snoozing,
    OnBreak,
    Completed,
}

impl Mode {
    /// Modes that wait on an outstanding confirmation token.
    pub fn awaits_confirmation(&self) -> bool {
        matches!(self, Mode::AwaitingFocusConfirmation | Mode::AwaitingSnoozeConfirmation)
    }

    /// Modes that run a countdown.
    pub fn counts_down(&self) -> bool {
        matches!(self, Mode::Working | Mode::Snoozing | Mode::OnBreak)
    }

    /// Modes whose elapsed time counts as work.
    pub fn is_work(&self) -> bool {
        matches!(self, Mode::Working | Mode::Snoozing)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::Working => "working",
            Mode::AwaitingFocusConfirmation => "awaiting focus confirmation",
            Mode::AwaitingSnoozeConfirmation => "awaiting snooze confirmation",
            Mode::Snoozing => "snoozing",
            Mode::OnBreak => "on break",
            Mode::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The single source of truth for the timer. Owned by the progression machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub session: usize,
    pub work_phase: usize,
    pub snooze_count: u32,
    pub phase_elapsed: u64,
    pub session_elapsed: u64,
    pub total_work_elapsed: u64,
    /// Countdown target in seconds for whatever is currently running.
    pub current_phase_duration: u64,
    pub mode: Mode,
    pub paused: bool,
    pub pending_confirmation: Option<ConfirmationToken>,
}

impl TimerState {
    /// Fresh state for the first phase of the first session.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            session: 0,
            work_phase: 0,
            snooze_count: 0,
            phase_elapsed: 0,
            session_elapsed: 0,
            total_work_elapsed: 0,
            current_phase_duration: config.phase_secs(0),
            mode: Mode::Idle,
            paused: false,
            pending_confirmation: None,
        }
    }

    pub fn phase_remaining(&self) -> u64 {
        self.current_phase_duration.saturating_sub(self.phase_elapsed)
    }
}

/// Everything a display needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub paused: bool,
    pub label: String,
    /// `mm:ss` left in the current countdown.
    pub phase_remaining: String,
    /// `mm:ss` of work done today.
    pub total_work: String,
    pub session: usize,
    pub daily_sessions: usize,
    pub work_phase: usize,
    pub phase_count: usize,
    pub snooze_count: u32,
    pub max_snoozes: u32,
    pub phase_elapsed: u64,
    pub session_elapsed: u64,
    pub total_work_elapsed: u64,
    pub current_phase_duration: u64,
    pub pending_confirmation: Option<ConfirmationToken>,
}

impl Snapshot {
    pub fn capture(state: &TimerState, config: &TimerConfig) -> Self {
        Self {
            mode: state.mode,
            paused: state.paused,
            label: label_for(state, config),
            phase_remaining: format_mmss(state.phase_remaining()),
            total_work: format_mmss(state.total_work_elapsed),
            session: state.session,
            daily_sessions: config.daily_sessions,
            work_phase: state.work_phase,
            phase_count: config.phase_count(),
            snooze_count: state.snooze_count,
            max_snoozes: config.max_snoozes,
            phase_elapsed: state.phase_elapsed,
            session_elapsed: state.session_elapsed,
            total_work_elapsed: state.total_work_elapsed,
            current_phase_duration: state.current_phase_duration,
            pending_confirmation: state.pending_confirmation,
        }
    }
}

fn label_for(state: &TimerState, config: &TimerConfig) -> String {
    if state.paused {
        return "Paused".to_string();
    }
    match state.mode {
        Mode::Idle => "Start Working".to_string(),
        Mode::Working => "Working...".to_string(),
        Mode::Snoozing => format!("Extended work {}/{}", state.snooze_count, config.max_snoozes),
        Mode::OnBreak => "Break time".to_string(),
        Mode::AwaitingFocusConfirmation => "Focus Check".to_string(),
        Mode::AwaitingSnoozeConfirmation => "Snooze?".to_string(),
        Mode::Completed => "All sessions complete!".to_string(),
    }
}

/// Format seconds as `mm:ss`. Minutes are not wrapped into hours.
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
