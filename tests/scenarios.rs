use std::sync::Arc;

use dynamic_pomodoro::{
    config::TimerConfig,
    events::{ConfirmOption, ConfirmationAnswer, Effect, Resolution},
    state::{Machine, Mode},
};
use proptest::prelude::*;

fn config(
    work_phases: Vec<f64>,
    breaks: Vec<f64>,
    snooze_interval: f64,
    max_snoozes: u32,
    daily_sessions: usize,
) -> Arc<TimerConfig> {
    let config = TimerConfig {
        work_phases,
        breaks,
        snooze_interval,
        max_snoozes,
        daily_sessions,
        focus_check_timeout_seconds: 10,
        snooze_prompt_timeout_seconds: 15,
        popup_autoconfirm_seconds: 30,
        popup_warning_seconds: 5,
    };
    config.validate().unwrap();
    Arc::new(config)
}

fn ticks(machine: &mut Machine, n: u64) -> Vec<Effect> {
    (0..n).flat_map(|_| machine.tick()).collect()
}

fn reply(machine: &mut Machine, option: ConfirmOption, resolution: Resolution) {
    let token = machine.state().pending_confirmation.expect("no pending confirmation");
    machine.answer(ConfirmationAnswer { token, option, resolution });
}

fn default_of(effects: &[Effect]) -> ConfirmOption {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Confirm(request) => Some(request.default),
            _ => None,
        })
        .expect("no confirmation requested")
}

#[test]
fn declining_focus_check_goes_on_break_without_advancing() {
    let mut m = Machine::new(config(vec![1.0, 1.0], vec![1.0], 1.0, 0, 4));
    m.start().unwrap();
    ticks(&mut m, 60);
    assert_eq!(m.mode(), Mode::AwaitingFocusConfirmation);

    reply(&mut m, ConfirmOption::No, Resolution::Explicit);
    assert_eq!(m.mode(), Mode::OnBreak);
    assert_eq!(m.state().work_phase, 0);
}

#[test]
fn confirming_focus_check_starts_next_phase() {
    let mut m = Machine::new(config(vec![1.0, 1.0], vec![1.0], 1.0, 0, 4));
    m.start().unwrap();
    ticks(&mut m, 60);

    reply(&mut m, ConfirmOption::Yes, Resolution::Explicit);
    let state = m.state();
    assert_eq!(state.mode, Mode::Working);
    assert_eq!(state.work_phase, 1);
    assert_eq!(state.phase_elapsed, 0);
    assert_eq!(state.current_phase_duration, 60);
}

#[test]
fn unanswered_snooze_prompt_defaults_to_break() {
    let mut m = Machine::new(config(vec![1.0, 1.0], vec![1.0], 1.0, 1, 4));
    m.start().unwrap();
    let effects = ticks(&mut m, 60);
    assert_eq!(default_of(&effects), ConfirmOption::Yes);
    reply(&mut m, ConfirmOption::Yes, Resolution::Explicit);

    let effects = ticks(&mut m, 60);
    assert_eq!(m.mode(), Mode::AwaitingSnoozeConfirmation);
    let default = default_of(&effects);
    assert_eq!(default, ConfirmOption::No);

    reply(&mut m, default, Resolution::Timeout);
    assert_eq!(m.mode(), Mode::OnBreak);
}

#[test]
fn last_break_of_the_day_completes() {
    let mut m = Machine::new(config(vec![1.0], vec![1.0], 1.0, 0, 1));
    m.start().unwrap();
    ticks(&mut m, 60);
    assert_eq!(m.mode(), Mode::OnBreak);

    let effects = ticks(&mut m, 60);
    assert_eq!(m.mode(), Mode::Completed);
    assert_eq!(m.state().session, 1);
    assert_eq!(m.ticking(), None);
    assert!(effects.iter().any(|e| matches!(e, Effect::Banner(b) if b.title == "Pomodoro Finished")));

    let frozen = m.state().clone();
    assert!(ticks(&mut m, 30).is_empty());
    assert_eq!(m.state(), &frozen);
}

#[test]
fn stop_during_break_abandons_it() {
    let mut m = Machine::new(config(vec![1.0, 1.0], vec![5.0], 1.0, 0, 2));
    m.start().unwrap();
    ticks(&mut m, 60);
    reply(&mut m, ConfirmOption::Yes, Resolution::Explicit);
    ticks(&mut m, 70);
    assert_eq!(m.mode(), Mode::OnBreak);

    m.stop().unwrap();
    assert_eq!(m.mode(), Mode::Idle);
    assert_eq!(m.state().session, 1);
    assert_eq!(m.state().work_phase, 0);
    assert_eq!(m.state().phase_elapsed, 0);
    assert_eq!(m.ticking(), None);

    m.start().unwrap();
    ticks(&mut m, 60);
    reply(&mut m, ConfirmOption::No, Resolution::Explicit);
    m.stop().unwrap();
    assert_eq!(m.mode(), Mode::Completed);
}

#[derive(Debug, Clone)]
enum Op {
    Ticks(u16),
    Answer(ConfirmOption),
    DuplicateAnswer(ConfirmOption),
    Start,
    Pause,
    Resume,
    Stop,
    Session(usize),
    Phase(usize),
}

fn op(with_session_select: bool) -> BoxedStrategy<Op> {
    let base = prop_oneof![
        4 => (1u16..200).prop_map(Op::Ticks),
        2 => Just(Op::Answer(ConfirmOption::Yes)),
        2 => Just(Op::Answer(ConfirmOption::No)),
        1 => Just(Op::DuplicateAnswer(ConfirmOption::Yes)),
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Stop),
        1 => (0usize..5).prop_map(Op::Phase),
    ];
    if with_session_select {
        prop_oneof![9 => base, 1 => (0usize..5).prop_map(Op::Session)].boxed()
    } else {
        base.boxed()
    }
}

fn timer_config() -> impl Strategy<Value = Arc<TimerConfig>> {
    (
        prop::collection::vec(1u8..4, 1..4),
        prop::collection::vec(1u8..3, 1..3),
        1u8..3,
        0u32..4,
        1usize..4,
    )
        .prop_map(|(phases, breaks, snooze, max_snoozes, sessions)| {
            config(
                phases.into_iter().map(f64::from).collect(),
                breaks.into_iter().map(f64::from).collect(),
                f64::from(snooze),
                max_snoozes,
                sessions,
            )
        })
}

fn apply(m: &mut Machine, op: &Op) {
    match op {
        Op::Ticks(n) => {
            for _ in 0..*n {
                m.tick();
                check_invariants(m);
            }
        }
        Op::Answer(option) => {
            if let Some(token) = m.state().pending_confirmation {
                m.answer(ConfirmationAnswer { token, option: *option, resolution: Resolution::Explicit });
            }
        }
        Op::DuplicateAnswer(option) => {
            if let Some(token) = m.state().pending_confirmation {
                let answer = ConfirmationAnswer { token, option: *option, resolution: Resolution::Explicit };
                m.answer(answer);
                let after = m.state().clone();
                let late = ConfirmationAnswer { resolution: Resolution::Timeout, ..answer };
                assert!(m.answer(late).is_empty());
                assert_eq!(m.state(), &after);
            }
        }
        Op::Start => {
            let _ = m.start();
        }
        Op::Pause => {
            let _ = m.pause();
        }
        Op::Resume => {
            let _ = m.resume();
        }
        Op::Stop => {
            let _ = m.stop();
        }
        Op::Session(idx) => {
            let _ = m.select_session(*idx);
        }
        Op::Phase(idx) => {
            let _ = m.select_phase(*idx);
        }
    }
    check_invariants(m);
}

fn check_invariants(m: &Machine) {
    let state = m.state();
    let config = m.config();
    assert!(state.snooze_count <= config.max_snoozes);
    assert_eq!(state.pending_confirmation.is_some(), state.mode.awaits_confirmation());
    assert!(state.phase_elapsed <= state.current_phase_duration);
    assert!(state.work_phase < config.phase_count());
    if state.mode == Mode::Completed {
        assert_eq!(state.session, config.daily_sessions);
    } else {
        assert!(state.session < config.daily_sessions);
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(
        config in timer_config(),
        ops in prop::collection::vec(op(true), 1..60),
    ) {
        let mut m = Machine::new(config);
        for op in &ops {
            apply(&mut m, op);
        }
    }

    #[test]
    fn session_never_decreases_without_manual_selection(
        config in timer_config(),
        ops in prop::collection::vec(op(false), 1..60),
    ) {
        let mut m = Machine::new(config);
        let mut last = m.state().session;
        for op in &ops {
            apply(&mut m, op);
            prop_assert!(m.state().session >= last);
            last = m.state().session;
        }
    }

    #[test]
    fn pause_then_resume_restores_the_state(
        config in timer_config(),
        ops in prop::collection::vec(op(true), 0..30),
    ) {
        let mut m = Machine::new(config);
        for op in &ops {
            apply(&mut m, op);
        }
        if m.state().paused {
            m.resume().unwrap();
        }
        let before = m.state().clone();
        if m.pause().is_ok() {
            m.resume().unwrap();
            prop_assert_eq!(m.state(), &before);
        }
    }

    #[test]
    fn exhausted_snoozes_always_break(
        max_snoozes in 0u32..4,
    ) {
        let mut m = Machine::new(config(vec![1.0], vec![1.0], 1.0, max_snoozes, 1));
        m.start().unwrap();
        ticks(&mut m, 60);
        for _ in 0..max_snoozes {
            prop_assert_eq!(m.mode(), Mode::AwaitingSnoozeConfirmation);
            reply(&mut m, ConfirmOption::Yes, Resolution::Explicit);
            ticks(&mut m, 60);
        }
        prop_assert_eq!(m.mode(), Mode::OnBreak);
        prop_assert_eq!(m.state().snooze_count, max_snoozes);
    }
}
