//! Session/phase progression state machine
//!
//! The machine is synchronous: every operation mutates [`TimerState`] in place
//! and returns the outbound [`Effect`]s the caller must carry out. It never
//! blocks and never talks to a sink directly, so it can be driven from a
//! single dispatcher task and tested without a runtime.
//!
//! ```text
//! Idle -> Working -> AwaitingFocusConfirmation -> Working (next phase)
//!                 \                            \-> OnBreak
//!                  \-> AwaitingSnoozeConfirmation -> Snoozing -> (snooze gate again)
//!                                              \-> OnBreak -> Working (next session)
//!                                                          \-> Completed
//! ```

use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use super::{Mode, Snapshot, TimerState};
use crate::{
    config::TimerConfig,
    error::CommandError,
    events::{
        Banner, Command, ConfirmOption, ConfirmationAnswer, ConfirmationRequest,
        ConfirmationToken, Effect, PromptKind, Tone,
    },
};

pub type Effects = Vec<Effect>;

#[derive(Debug, Clone)]
pub struct Machine {
    config: Arc<TimerConfig>,
    state: TimerState,
    next_token: u64,
    /// Bumped every time a countdown (re)starts from zero.
    epoch: u64,
}

impl Machine {
    pub fn new(config: Arc<TimerConfig>) -> Self {
        let state = TimerState::new(&config);
        Self {
            config,
            state,
            next_token: 1,
            epoch: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config)
    }

    /// The countdown epoch while ticks should be delivered, `None` otherwise.
    pub fn ticking(&self) -> Option<u64> {
        if self.state.paused || !self.state.mode.counts_down() {
            return None;
        }
        Some(self.epoch)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) -> Result<Effects, CommandError> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Toggle => self.toggle(),
            Command::Stop => self.stop(),
            Command::SelectSession(idx) => self.select_session(idx),
            Command::SelectPhase(idx) => self.select_phase(idx),
        }
    }

    pub fn start(&mut self) -> Result<Effects, CommandError> {
        match self.state.mode {
            Mode::Idle => {}
            Mode::OnBreak => return Err(CommandError::OnBreak),
            Mode::Completed => return Err(CommandError::Completed),
            other => return Err(CommandError::AlreadyRunning(other)),
        }
        let mut effects = Effects::new();
        self.begin_work(&mut effects);
        Ok(effects)
    }

    pub fn pause(&mut self) -> Result<Effects, CommandError> {
        if self.state.paused {
            return Err(CommandError::AlreadyPaused);
        }
        if matches!(self.state.mode, Mode::Idle | Mode::Completed) {
            return Err(CommandError::NotActive(self.state.mode));
        }
        self.state.paused = true;
        info!(mode = %self.state.mode, "Timer paused");
        Ok(self
            .state
            .pending_confirmation
            .map(Effect::HoldConfirmation)
            .into_iter()
            .collect())
    }

    pub fn resume(&mut self) -> Result<Effects, CommandError> {
        if !self.state.paused {
            return Err(CommandError::NotPaused);
        }
        self.state.paused = false;
        info!(mode = %self.state.mode, "Timer resumed");
        Ok(self
            .state
            .pending_confirmation
            .map(Effect::ReleaseConfirmation)
            .into_iter()
            .collect())
    }

    /// The main button: resume when paused, start when idle, pause otherwise.
    pub fn toggle(&mut self) -> Result<Effects, CommandError> {
        if self.state.paused {
            self.resume()
        } else if self.state.mode == Mode::Idle {
            self.start()
        } else {
            self.pause()
        }
    }

    /// End the current session right away, skipping any remaining break.
    pub fn stop(&mut self) -> Result<Effects, CommandError> {
        if self.state.mode == Mode::Completed {
            return Err(CommandError::Completed);
        }
        let mut effects = Effects::new();
        self.retire_pending(&mut effects);
        let state = &mut self.state;
        state.paused = false;
        state.phase_elapsed = 0;
        state.session_elapsed = 0;
        state.snooze_count = 0;
        state.work_phase = 0;
        state.session += 1;
        info!(session = state.session, "Session stopped");

        if self.state.session >= self.config.daily_sessions {
            self.complete(&mut effects);
        } else {
            self.state.mode = Mode::Idle;
            self.state.current_phase_duration = self.config.phase_secs(0);
        }
        Ok(effects)
    }

    pub fn select_session(&mut self, idx: usize) -> Result<Effects, CommandError> {
        if idx >= self.config.daily_sessions {
            return Err(CommandError::SessionOutOfRange {
                index: idx,
                count: self.config.daily_sessions,
            });
        }
        let mut effects = Effects::new();
        self.retire_pending(&mut effects);
        self.state.session = idx;
        self.reset_to_phase(0);
        info!(session = idx, "Session selected");
        Ok(effects)
    }

    pub fn select_phase(&mut self, idx: usize) -> Result<Effects, CommandError> {
        if idx >= self.config.phase_count() {
            return Err(CommandError::PhaseOutOfRange {
                index: idx,
                count: self.config.phase_count(),
            });
        }
        if self.state.mode == Mode::Completed {
            return Err(CommandError::Completed);
        }
        let mut effects = Effects::new();
        self.retire_pending(&mut effects);
        self.reset_to_phase(idx);
        info!(phase = idx, "Phase selected");
        Ok(effects)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Advance one second.
    pub fn tick(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.state.paused {
            debug!("Tick ignored while paused");
            return effects;
        }
        match self.state.mode {
            Mode::Working | Mode::Snoozing => {
                self.state.phase_elapsed += 1;
                self.state.session_elapsed += 1;
                self.state.total_work_elapsed += 1;
                if self.state.phase_elapsed >= self.state.current_phase_duration {
                    if self.state.mode == Mode::Working {
                        self.complete_phase(&mut effects);
                    } else {
                        self.snooze_gate(&mut effects);
                    }
                }
            }
            Mode::OnBreak => {
                self.state.phase_elapsed += 1;
                if self.state.phase_elapsed >= self.state.current_phase_duration {
                    self.start_next_session(&mut effects);
                }
            }
            _ => {}
        }
        effects
    }

    /// Apply a resolved confirmation. Stale or duplicate answers are dropped.
    pub fn answer(&mut self, answer: ConfirmationAnswer) -> Effects {
        let mut effects = Effects::new();
        if self.state.pending_confirmation != Some(answer.token) {
            debug!(token = %answer.token, "Discarding answer for a confirmation that is not outstanding");
            return effects;
        }
        self.state.pending_confirmation = None;
        info!(
            token = %answer.token,
            option = %answer.option,
            resolution = ?answer.resolution,
            "Confirmation resolved"
        );

        match (self.state.mode, answer.option) {
            (Mode::AwaitingFocusConfirmation, ConfirmOption::Yes) => {
                let next = self.state.work_phase + 1;
                if next >= self.config.phase_count() {
                    self.enter_break(&mut effects);
                } else {
                    self.state.work_phase = next;
                    self.begin_work(&mut effects);
                }
            }
            (Mode::AwaitingSnoozeConfirmation, ConfirmOption::Yes) => {
                self.state.snooze_count += 1;
                self.begin_snooze(&mut effects);
            }
            (Mode::AwaitingFocusConfirmation | Mode::AwaitingSnoozeConfirmation, ConfirmOption::No) => {
                self.enter_break(&mut effects);
            }
            (mode, _) => {
                warn!(%mode, "Confirmation token outstanding outside a confirmation mode");
            }
        }
        effects
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn begin_work(&mut self, effects: &mut Effects) {
        let phase = self.state.work_phase;
        self.restart_countdown(Mode::Working, self.config.phase_secs(phase));
        info!(session = self.state.session, phase, "Work phase started");
        effects.push(Effect::Banner(
            Banner::new(
                "Work Started",
                format!("Only {} minutes to go", self.config.work_phases[phase]),
            )
            .lasting(Duration::from_secs(8)),
        ));
    }

    fn begin_snooze(&mut self, effects: &mut Effects) {
        self.restart_countdown(Mode::Snoozing, self.config.snooze_secs());
        info!(
            snooze = self.state.snooze_count,
            max = self.config.max_snoozes,
            "Extended work started"
        );
        effects.push(Effect::Banner(
            Banner::new(
                "Extended Work",
                format!("Starting {} minutes of extended work", self.config.snooze_interval),
            )
            .lasting(Duration::from_secs(3)),
        ));
    }

    fn complete_phase(&mut self, effects: &mut Effects) {
        if self.state.work_phase + 1 < self.config.phase_count() {
            self.await_confirmation(
                Mode::AwaitingFocusConfirmation,
                PromptKind::FocusCheck,
                "Focus Check".to_string(),
                "Did you focus the past minutes?".to_string(),
                ConfirmOption::Yes,
                self.config.focus_check_timeout(),
                effects,
            );
        } else {
            self.snooze_gate(effects);
        }
    }

    /// Offer a snooze while any remain, otherwise go on break.
    fn snooze_gate(&mut self, effects: &mut Effects) {
        if self.state.snooze_count < self.config.max_snoozes {
            let body = format!(
                "Continue working for {} more minutes?",
                self.config.snooze_interval
            );
            self.await_confirmation(
                Mode::AwaitingSnoozeConfirmation,
                PromptKind::Snooze,
                "Snooze?".to_string(),
                body,
                ConfirmOption::No,
                self.config.snooze_prompt_timeout(),
                effects,
            );
        } else {
            self.enter_break(effects);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn await_confirmation(
        &mut self,
        mode: Mode,
        kind: PromptKind,
        title: String,
        body: String,
        default: ConfirmOption,
        timeout: Duration,
        effects: &mut Effects,
    ) {
        let token = ConfirmationToken(self.next_token);
        self.next_token += 1;
        self.state.mode = mode;
        self.state.pending_confirmation = Some(token);
        info!(%token, ?kind, "Waiting for confirmation");
        effects.push(Effect::PlayTone(Tone::Chime));
        effects.push(Effect::Confirm(ConfirmationRequest {
            token,
            kind,
            title,
            body,
            options: vec![ConfirmOption::Yes, ConfirmOption::No],
            default,
            timeout,
        }));
    }

    fn enter_break(&mut self, effects: &mut Effects) {
        let secs = self.config.break_secs(self.state.session);
        self.restart_countdown(Mode::OnBreak, secs);
        info!(session = self.state.session, secs, "Break started");
        effects.push(Effect::PlayTone(Tone::Gong));
        effects.push(Effect::Banner(Banner::new("Session complete", "Break started!")));
    }

    fn start_next_session(&mut self, effects: &mut Effects) {
        self.state.session += 1;
        if self.state.session >= self.config.daily_sessions {
            self.complete(effects);
            return;
        }
        self.state.work_phase = 0;
        self.state.snooze_count = 0;
        self.state.session_elapsed = 0;
        self.state.phase_elapsed = 0;
        self.state.mode = Mode::Idle;
        info!(session = self.state.session, "Next session starting");
        effects.push(Effect::PlayTone(Tone::Chime));
        effects.push(Effect::Banner(Banner::new(
            "Break's Over",
            "Break's over, back to work. Session starting now!",
        )));
        self.begin_work(effects);
    }

    fn complete(&mut self, effects: &mut Effects) {
        self.state.mode = Mode::Completed;
        self.state.paused = false;
        self.state.pending_confirmation = None;
        self.state.phase_elapsed = 0;
        self.state.current_phase_duration = 0;
        info!(total_work = self.state.total_work_elapsed, "All sessions complete");
        effects.push(Effect::Banner(Banner::new("Pomodoro Finished", "All sessions complete!")));
    }

    fn restart_countdown(&mut self, mode: Mode, secs: u64) {
        self.state.mode = mode;
        self.state.phase_elapsed = 0;
        self.state.current_phase_duration = secs;
        self.epoch += 1;
    }

    /// Back to `Idle` at `phase` of the current session. Total work is kept.
    fn reset_to_phase(&mut self, phase: usize) {
        let state = &mut self.state;
        state.work_phase = phase;
        state.snooze_count = 0;
        state.phase_elapsed = 0;
        state.session_elapsed = 0;
        state.paused = false;
        state.mode = Mode::Idle;
        state.current_phase_duration = self.config.phase_secs(phase);
    }

    fn retire_pending(&mut self, effects: &mut Effects) {
        if let Some(token) = self.state.pending_confirmation.take() {
            debug!(%token, "Retiring outstanding confirmation");
            effects.push(Effect::Retire(token));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Resolution;

    fn machine(raw: &str) -> Machine {
        Machine::new(Arc::new(TimerConfig::from_json(raw).unwrap()))
    }

    fn two_phases(max_snoozes: u32, daily_sessions: usize) -> Machine {
        machine(&format!(
            r#"{{"work_phases": [1, 1], "breaks": [2, 3], "snooze_interval": 1,
                "max_snoozes": {max_snoozes}, "daily_sessions": {daily_sessions}}}"#
        ))
    }

    fn ticks(machine: &mut Machine, n: u64) -> Effects {
        let mut effects = Effects::new();
        for _ in 0..n {
            effects.extend(machine.tick());
        }
        effects
    }

    fn answer(machine: &mut Machine, option: ConfirmOption) -> Effects {
        let token = machine.state().pending_confirmation.expect("no pending confirmation");
        machine.answer(ConfirmationAnswer { token, option, resolution: Resolution::Explicit })
    }

    fn confirm_request(effects: &[Effect]) -> &ConfirmationRequest {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Confirm(request) => Some(request),
                _ => None,
            })
            .expect("no confirmation requested")
    }

    #[test]
    fn start_runs_first_phase() {
        let mut m = two_phases(0, 2);
        let effects = m.start().unwrap();
        assert_eq!(m.mode(), Mode::Working);
        assert_eq!(m.state().current_phase_duration, 60);
        assert!(m.ticking().is_some());
        assert!(matches!(&effects[..], [Effect::Banner(b)] if b.title == "Work Started"));
    }

    #[test]
    fn start_is_rejected_unless_idle() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        assert_eq!(m.start(), Err(CommandError::AlreadyRunning(Mode::Working)));

        ticks(&mut m, 60);
        answer(&mut m, ConfirmOption::No);
        assert_eq!(m.mode(), Mode::OnBreak);
        assert_eq!(m.start(), Err(CommandError::OnBreak));
    }

    #[test]
    fn ticks_count_work_but_not_breaks() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 10);
        assert_eq!(m.state().session_elapsed, 10);
        assert_eq!(m.state().total_work_elapsed, 10);

        ticks(&mut m, 50);
        answer(&mut m, ConfirmOption::No);
        ticks(&mut m, 30);
        assert_eq!(m.state().phase_elapsed, 30);
        assert_eq!(m.state().total_work_elapsed, 60);
    }

    #[test]
    fn focus_prompt_defaults_to_yes() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        let effects = ticks(&mut m, 60);
        assert_eq!(m.mode(), Mode::AwaitingFocusConfirmation);
        assert_eq!(m.ticking(), None);
        assert!(effects.contains(&Effect::PlayTone(Tone::Chime)));
        let request = confirm_request(&effects);
        assert_eq!(request.kind, PromptKind::FocusCheck);
        assert_eq!(request.default, ConfirmOption::Yes);
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert_eq!(m.state().pending_confirmation, Some(request.token));
    }

    #[test]
    fn ticks_while_awaiting_are_no_ops() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 60);
        let before = m.state().clone();
        assert!(ticks(&mut m, 5).is_empty());
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn last_phase_without_snoozes_goes_straight_to_break() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 60);
        answer(&mut m, ConfirmOption::Yes);
        let effects = ticks(&mut m, 60);
        assert_eq!(m.mode(), Mode::OnBreak);
        assert_eq!(m.state().current_phase_duration, 120);
        assert!(effects.contains(&Effect::PlayTone(Tone::Gong)));
        assert_eq!(m.state().pending_confirmation, None);
    }

    #[test]
    fn snooze_loop_is_bounded() {
        let mut m = machine(
            r#"{"work_phases": [1], "breaks": [1], "snooze_interval": 0.5,
                "max_snoozes": 2, "daily_sessions": 1}"#,
        );
        m.start().unwrap();
        ticks(&mut m, 60);
        assert_eq!(m.mode(), Mode::AwaitingSnoozeConfirmation);

        answer(&mut m, ConfirmOption::Yes);
        assert_eq!(m.mode(), Mode::Snoozing);
        assert_eq!(m.state().current_phase_duration, 30);
        ticks(&mut m, 30);
        assert_eq!(m.mode(), Mode::AwaitingSnoozeConfirmation);

        answer(&mut m, ConfirmOption::Yes);
        assert_eq!(m.state().snooze_count, 2);
        ticks(&mut m, 30);
        assert_eq!(m.mode(), Mode::OnBreak);
        assert_eq!(m.state().total_work_elapsed, 120);
    }

    #[test]
    fn break_end_auto_starts_next_session() {
        let mut m = two_phases(1, 3);
        m.start().unwrap();
        ticks(&mut m, 60);
        answer(&mut m, ConfirmOption::Yes);
        ticks(&mut m, 60);
        assert_eq!(m.mode(), Mode::AwaitingSnoozeConfirmation);
        answer(&mut m, ConfirmOption::No);
        assert_eq!(m.mode(), Mode::OnBreak);

        let effects = ticks(&mut m, 120);
        assert_eq!(m.mode(), Mode::Working);
        assert_eq!(m.state().session, 1);
        assert_eq!(m.state().work_phase, 0);
        assert_eq!(m.state().snooze_count, 0);
        assert_eq!(m.state().session_elapsed, 0);
        assert_eq!(m.state().total_work_elapsed, 120);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::Banner(b) if b.title == "Break's Over")));

        ticks(&mut m, 60);
        answer(&mut m, ConfirmOption::No);
        assert_eq!(m.state().current_phase_duration, 180);
    }

    #[test]
    fn stale_answers_are_discarded() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 60);
        let token = m.state().pending_confirmation.unwrap();
        let no = ConfirmationAnswer {
            token,
            option: ConfirmOption::No,
            resolution: Resolution::Explicit,
        };
        m.answer(no);
        let after_first = m.state().clone();

        let yes = ConfirmationAnswer { option: ConfirmOption::Yes, ..no };
        assert!(m.answer(yes).is_empty());
        assert_eq!(m.state(), &after_first);

        let unknown = ConfirmationAnswer { token: ConfirmationToken(99), ..no };
        assert!(m.answer(unknown).is_empty());
    }

    #[test]
    fn pause_holds_pending_confirmation() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 60);
        let token = m.state().pending_confirmation.unwrap();
        assert_eq!(m.pause().unwrap(), vec![Effect::HoldConfirmation(token)]);
        assert_eq!(m.pause(), Err(CommandError::AlreadyPaused));
        assert_eq!(m.resume().unwrap(), vec![Effect::ReleaseConfirmation(token)]);
        assert_eq!(m.resume(), Err(CommandError::NotPaused));
    }

    #[test]
    fn pause_is_rejected_when_idle() {
        let mut m = two_phases(0, 2);
        assert_eq!(m.pause(), Err(CommandError::NotActive(Mode::Idle)));
    }

    #[test]
    fn paused_ticks_do_nothing() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 5);
        m.pause().unwrap();
        assert_eq!(m.ticking(), None);
        ticks(&mut m, 100);
        assert_eq!(m.state().phase_elapsed, 5);
    }

    #[test]
    fn answer_while_paused_keeps_ticker_halted() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        ticks(&mut m, 60);
        m.pause().unwrap();
        answer(&mut m, ConfirmOption::Yes);
        assert_eq!(m.mode(), Mode::Working);
        assert_eq!(m.state().work_phase, 1);
        assert_eq!(m.ticking(), None);
        m.resume().unwrap();
        assert!(m.ticking().is_some());
    }

    #[test]
    fn toggle_starts_pauses_and_resumes() {
        let mut m = two_phases(0, 2);
        m.toggle().unwrap();
        assert_eq!(m.mode(), Mode::Working);
        m.toggle().unwrap();
        assert!(m.state().paused);
        m.toggle().unwrap();
        assert!(!m.state().paused);
    }

    #[test]
    fn stop_retires_pending_confirmation() {
        let mut m = two_phases(0, 3);
        m.start().unwrap();
        ticks(&mut m, 60);
        let token = m.state().pending_confirmation.unwrap();
        let effects = m.stop().unwrap();
        assert_eq!(effects, vec![Effect::Retire(token)]);
        assert_eq!(m.mode(), Mode::Idle);
        assert_eq!(m.state().session, 1);
        assert_eq!(m.state().pending_confirmation, None);
        assert_eq!(m.state().total_work_elapsed, 60);
    }

    #[test]
    fn stop_on_last_session_completes() {
        let mut m = two_phases(0, 1);
        m.start().unwrap();
        let effects = m.stop().unwrap();
        assert_eq!(m.mode(), Mode::Completed);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::Banner(b) if b.title == "Pomodoro Finished")));
        assert_eq!(m.stop(), Err(CommandError::Completed));
        assert_eq!(m.start(), Err(CommandError::Completed));
    }

    #[test]
    fn selection_resets_counters_but_keeps_total() {
        let mut m = two_phases(0, 3);
        m.start().unwrap();
        ticks(&mut m, 60);
        let token = m.state().pending_confirmation.unwrap();

        let effects = m.select_phase(1).unwrap();
        assert_eq!(effects, vec![Effect::Retire(token)]);
        assert_eq!(m.mode(), Mode::Idle);
        assert_eq!(m.state().work_phase, 1);
        assert_eq!(m.state().phase_elapsed, 0);
        assert_eq!(m.state().session_elapsed, 0);
        assert_eq!(m.state().total_work_elapsed, 60);

        m.select_session(2).unwrap();
        assert_eq!(m.state().session, 2);
        assert_eq!(m.state().work_phase, 0);
        assert_eq!(m.state().current_phase_duration, 60);
    }

    #[test]
    fn out_of_range_selection_changes_nothing() {
        let mut m = two_phases(0, 3);
        m.start().unwrap();
        ticks(&mut m, 7);
        let before = m.state().clone();
        assert_eq!(
            m.select_session(3),
            Err(CommandError::SessionOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            m.select_phase(2),
            Err(CommandError::PhaseOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn session_can_be_reselected_after_completion() {
        let mut m = two_phases(0, 1);
        m.stop().unwrap();
        assert_eq!(m.mode(), Mode::Completed);
        assert_eq!(m.select_phase(0), Err(CommandError::Completed));
        m.select_session(0).unwrap();
        assert_eq!(m.mode(), Mode::Idle);
        m.start().unwrap();
        assert_eq!(m.mode(), Mode::Working);
    }

    #[test]
    fn epoch_changes_on_every_countdown_restart() {
        let mut m = two_phases(0, 2);
        m.start().unwrap();
        let first = m.ticking().unwrap();
        ticks(&mut m, 60);
        answer(&mut m, ConfirmOption::Yes);
        let second = m.ticking().unwrap();
        assert_ne!(first, second);
        m.pause().unwrap();
        m.resume().unwrap();
        assert_eq!(m.ticking(), Some(second));
    }
}
