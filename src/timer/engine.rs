//! Timer engine for the Pomodoro Timer.
//!
//! The engine is a plain state machine: every operation mutates the owned
//! [`TimerState`] and returns the resulting snapshot together with the
//! effects the presentation layer should execute. It never sleeps, never
//! talks to a collaborator and never fails; out-of-range input is clamped.

use tracing::debug;

use crate::types::content::{
    create_break_completed_content, create_session_completed_content,
    create_session_paused_content, create_session_restarted_content,
    create_session_resumed_content, create_session_started_content,
};
use crate::types::{
    AudioCue, Direction, Effect, TimerConfig, TimerPhase, TimerSnapshot, TimerState, TimerStatus,
};

// ============================================================================
// Transition
// ============================================================================

/// Result of one engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the operation
    pub snapshot: TimerSnapshot,
    /// Effects to execute, in order
    pub effects: Vec<Effect>,
}

impl Transition {
    /// Returns true if the operation produced no effects.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.effects.is_empty()
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the timer state and applies commands and ticks to it.
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Creates an idle engine at the top of a fresh session.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            state: TimerState::new(config),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from_timer_state(&self.state)
    }

    /// Returns a reference to the current timer state.
    #[must_use]
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns true while the countdown is ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Returns the derived machine state.
    #[must_use]
    pub fn status(&self) -> TimerStatus {
        self.state.status()
    }

    /// Changes the break length by one minute.
    ///
    /// The current countdown is left alone, even during a break.
    pub fn adjust_break(&mut self, direction: Direction) -> Transition {
        if let Some(minutes) = direction.apply(self.state.break_minutes) {
            debug!("break length {} -> {}", self.state.break_minutes, minutes);
            self.state.break_minutes = minutes;
        }
        self.transition(Vec::new())
    }

    /// Changes the session length by one minute.
    ///
    /// A successful change stops the countdown and resets it to the new
    /// session length, whatever the phase. Decrementing at the minimum
    /// changes nothing.
    pub fn adjust_session(&mut self, direction: Direction) -> Transition {
        if let Some(minutes) = direction.apply(self.state.session_minutes) {
            debug!("session length {} -> {}", self.state.session_minutes, minutes);
            self.state.session_minutes = minutes;
            self.state.running = false;
            self.state.remaining_seconds = self.state.session_seconds();
        }
        self.transition(Vec::new())
    }

    /// Starts or resumes the countdown.
    pub fn start(&mut self) -> Transition {
        self.state.running = true;

        let effects = if self.state.is_at_session_start() {
            debug!("session started");
            vec![
                Effect::notification(create_session_started_content(self.state.session_minutes)),
                Effect::cue(AudioCue::Start),
            ]
        } else {
            debug!("countdown resumed at {}", self.state.display());
            vec![Effect::notification(create_session_resumed_content())]
        };
        self.transition(effects)
    }

    /// Pauses the countdown.
    pub fn pause(&mut self) -> Transition {
        self.state.running = false;
        debug!("countdown paused at {}", self.state.display());
        self.transition(vec![Effect::notification(create_session_paused_content())])
    }

    /// Resets to an idle session. Does nothing unless the countdown is running.
    pub fn restart(&mut self) -> Transition {
        if !self.state.running {
            return self.transition(Vec::new());
        }

        self.state.running = false;
        self.state.phase = TimerPhase::Session;
        self.state.remaining_seconds = self.state.session_seconds();
        debug!("timer restarted");
        self.transition(vec![Effect::notification(
            create_session_restarted_content(),
        )])
    }

    /// Advances the countdown by one second.
    ///
    /// The tick that reaches zero also performs the phase transition.
    pub fn tick(&mut self) -> Transition {
        if !self.state.running {
            return self.transition(Vec::new());
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            return self.transition(Vec::new());
        }

        let effects = self.handle_phase_complete();
        self.transition(effects)
    }

    /// Switches to the next phase once the countdown hits zero.
    fn handle_phase_complete(&mut self) -> Vec<Effect> {
        match self.state.phase {
            TimerPhase::Session => {
                self.state.phase = TimerPhase::Break;
                self.state.remaining_seconds = self.state.break_seconds();
                debug!("session completed, break of {}m started", self.state.break_minutes);
                vec![
                    Effect::notification(create_session_completed_content(
                        self.state.break_minutes,
                    )),
                    Effect::cue(AudioCue::End),
                ]
            }
            TimerPhase::Break => {
                self.state.phase = TimerPhase::Session;
                self.state.remaining_seconds = self.state.session_seconds();
                self.state.running = false;
                debug!("break completed");
                vec![
                    Effect::notification(create_break_completed_content()),
                    Effect::cue(AudioCue::End),
                ]
            }
        }
    }

    fn transition(&self, effects: Vec<Effect>) -> Transition {
        Transition {
            snapshot: self.snapshot(),
            effects,
        }
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotificationKind;

    fn events(transition: &Transition) -> Vec<NotificationKind> {
        transition
            .effects
            .iter()
            .filter_map(Effect::as_notification)
            .map(|n| n.event)
            .collect()
    }

    fn cues(transition: &Transition) -> Vec<AudioCue> {
        transition.effects.iter().filter_map(Effect::as_cue).collect()
    }

    fn tick_n(engine: &mut TimerEngine, n: u32) -> Vec<Transition> {
        (0..n).map(|_| engine.tick()).collect()
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_default_engine() {
            let engine = TimerEngine::default();
            let snapshot = engine.snapshot();

            assert_eq!(snapshot.break_minutes, 5);
            assert_eq!(snapshot.session_minutes, 25);
            assert_eq!(snapshot.remaining_seconds, 1500);
            assert_eq!(snapshot.display, "25:00");
            assert_eq!(snapshot.phase, TimerPhase::Session);
            assert!(!snapshot.running);
            assert_eq!(engine.status(), TimerStatus::Idle);
        }

        #[test]
        fn test_new_with_config() {
            let config = TimerConfig::default()
                .with_session_minutes(50)
                .with_break_minutes(10);
            let engine = TimerEngine::new(&config);

            assert_eq!(engine.state().session_minutes, 50);
            assert_eq!(engine.state().break_minutes, 10);
            assert_eq!(engine.state().remaining_seconds, 3000);
        }

        #[test]
        fn test_new_clamps_zero_lengths() {
            let config = TimerConfig {
                session_minutes: 0,
                break_minutes: 0,
            };
            let engine = TimerEngine::new(&config);

            assert_eq!(engine.state().session_minutes, 1);
            assert_eq!(engine.state().break_minutes, 1);
            assert_eq!(engine.state().remaining_seconds, 60);
        }
    }

    // ------------------------------------------------------------------------
    // Adjust Tests
    // ------------------------------------------------------------------------

    mod adjust_tests {
        use super::*;

        #[test]
        fn test_increment_break() {
            let mut engine = TimerEngine::default();
            for _ in 0..3 {
                engine.adjust_break(Direction::Increment);
            }
            assert_eq!(engine.state().break_minutes, 8);
        }

        #[test]
        fn test_decrement_break_clamps_at_one() {
            let mut engine = TimerEngine::default();
            for _ in 0..10 {
                let transition = engine.adjust_break(Direction::Decrement);
                assert!(transition.is_silent());
            }
            assert_eq!(engine.state().break_minutes, 1);
        }

        #[test]
        fn test_adjust_break_leaves_countdown_alone() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 1500);
            assert_eq!(engine.state().phase, TimerPhase::Break);
            let remaining = engine.state().remaining_seconds;

            engine.adjust_break(Direction::Increment);

            assert_eq!(engine.state().break_minutes, 6);
            assert_eq!(engine.state().remaining_seconds, remaining);
            assert!(engine.is_running());
        }

        #[test]
        fn test_increment_session_resyncs_remaining() {
            let mut engine = TimerEngine::default();
            let transition = engine.adjust_session(Direction::Increment);

            assert!(transition.is_silent());
            assert_eq!(transition.snapshot.session_minutes, 26);
            assert_eq!(transition.snapshot.remaining_seconds, 1560);
            assert_eq!(transition.snapshot.display, "26:00");
        }

        #[test]
        fn test_adjust_session_while_running_stops() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 10);

            engine.adjust_session(Direction::Decrement);

            assert!(!engine.is_running());
            assert_eq!(engine.state().session_minutes, 24);
            assert_eq!(engine.state().remaining_seconds, 1440);
        }

        #[test]
        fn test_adjust_session_during_break_keeps_phase() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 1500);

            engine.adjust_session(Direction::Increment);

            assert_eq!(engine.state().phase, TimerPhase::Break);
            assert!(!engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 1560);
        }

        #[test]
        fn test_decrement_session_at_minimum_is_noop() {
            let config = TimerConfig::default().with_session_minutes(1);
            let mut engine = TimerEngine::new(&config);
            engine.start();
            engine.tick();

            let before = engine.snapshot();
            let transition = engine.adjust_session(Direction::Decrement);

            assert_eq!(transition.snapshot, before);
            assert!(engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 59);
        }
    }

    // ------------------------------------------------------------------------
    // Start / Pause / Restart Tests
    // ------------------------------------------------------------------------

    mod control_tests {
        use super::*;

        #[test]
        fn test_start_from_top() {
            let mut engine = TimerEngine::default();
            let transition = engine.start();

            assert!(transition.snapshot.running);
            assert_eq!(events(&transition), vec![NotificationKind::SessionStarted]);
            assert_eq!(cues(&transition), vec![AudioCue::Start]);
            assert!(matches!(transition.effects[0], Effect::Notification(_)));
            assert!(matches!(transition.effects[1], Effect::AudioCue { .. }));
        }

        #[test]
        fn test_start_notification_mentions_session_length() {
            let mut engine = TimerEngine::default();
            let transition = engine.start();
            let notification = transition.effects[0].as_notification().unwrap();

            assert_eq!(notification.title, "Pomodoro started");
            assert!(notification.body.contains("25 minutes"));
        }

        #[test]
        fn test_resume_after_pause() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 3);
            engine.pause();

            let transition = engine.start();

            assert!(transition.snapshot.running);
            assert_eq!(transition.snapshot.remaining_seconds, 1497);
            assert_eq!(events(&transition), vec![NotificationKind::SessionResumed]);
            assert!(cues(&transition).is_empty());
        }

        #[test]
        fn test_start_during_break_resumes() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 1500);
            engine.pause();

            let transition = engine.start();

            assert_eq!(transition.snapshot.phase, TimerPhase::Break);
            assert_eq!(events(&transition), vec![NotificationKind::SessionResumed]);
        }

        #[test]
        fn test_pause() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 5);

            let transition = engine.pause();

            assert!(!transition.snapshot.running);
            assert_eq!(transition.snapshot.remaining_seconds, 1495);
            assert_eq!(events(&transition), vec![NotificationKind::SessionPaused]);
        }

        #[test]
        fn test_pause_while_idle_still_notifies() {
            let mut engine = TimerEngine::default();
            let transition = engine.pause();

            assert!(!transition.snapshot.running);
            assert_eq!(events(&transition), vec![NotificationKind::SessionPaused]);
        }

        #[test]
        fn test_restart_while_running() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 1600);
            assert_eq!(engine.state().phase, TimerPhase::Break);

            let transition = engine.restart();

            assert!(!transition.snapshot.running);
            assert_eq!(transition.snapshot.phase, TimerPhase::Session);
            assert_eq!(transition.snapshot.remaining_seconds, 1500);
            assert_eq!(events(&transition), vec![NotificationKind::SessionRestarted]);
        }

        #[test]
        fn test_restart_while_idle_is_noop() {
            let mut engine = TimerEngine::default();
            let before = engine.snapshot();

            let transition = engine.restart();

            assert_eq!(transition.snapshot, before);
            assert!(transition.is_silent());
        }

        #[test]
        fn test_restart_while_paused_is_noop() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 7);
            engine.pause();
            let before = engine.snapshot();

            let transition = engine.restart();

            assert_eq!(transition.snapshot, before);
            assert!(transition.is_silent());
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_ignored_when_idle() {
            let mut engine = TimerEngine::default();
            let transition = engine.tick();

            assert_eq!(transition.snapshot.remaining_seconds, 1500);
            assert!(transition.is_silent());
        }

        #[test]
        fn test_tick_decrements() {
            let mut engine = TimerEngine::default();
            engine.start();
            let transition = engine.tick();

            assert_eq!(transition.snapshot.remaining_seconds, 1499);
            assert_eq!(transition.snapshot.display, "24:59");
            assert!(transition.is_silent());
        }

        #[test]
        fn test_session_to_break_transition() {
            let mut engine = TimerEngine::default();
            engine.start();

            let transitions = tick_n(&mut engine, 1500);
            assert!(transitions[..1499].iter().all(Transition::is_silent));

            let last = transitions.last().unwrap();
            assert_eq!(last.snapshot.phase, TimerPhase::Break);
            assert_eq!(last.snapshot.remaining_seconds, 300);
            assert!(last.snapshot.running);
            assert_eq!(events(last), vec![NotificationKind::SessionCompleted]);
            assert_eq!(cues(last), vec![AudioCue::End]);
            assert!(last.effects[0]
                .as_notification()
                .unwrap()
                .body
                .contains("5 minutes"));
        }

        #[test]
        fn test_break_to_session_transition() {
            let mut engine = TimerEngine::default();
            engine.start();
            tick_n(&mut engine, 1500);

            let transitions = tick_n(&mut engine, 300);
            let last = transitions.last().unwrap();

            assert_eq!(last.snapshot.phase, TimerPhase::Session);
            assert_eq!(last.snapshot.remaining_seconds, 1500);
            assert!(!last.snapshot.running);
            assert_eq!(events(last), vec![NotificationKind::BreakCompleted]);
            assert_eq!(cues(last), vec![AudioCue::End]);
            assert_eq!(engine.status(), TimerStatus::Idle);
        }

        #[test]
        fn test_break_uses_break_length_at_transition() {
            let mut engine = TimerEngine::default();
            engine.adjust_break(Direction::Increment);
            engine.start();
            tick_n(&mut engine, 1000);
            engine.adjust_break(Direction::Increment);

            let transitions = tick_n(&mut engine, 500);

            assert_eq!(transitions.last().unwrap().snapshot.remaining_seconds, 420);
        }

        #[test]
        fn test_tick_at_zero_transitions() {
            let mut engine = TimerEngine::default();
            engine.state_mut().running = true;
            engine.state_mut().remaining_seconds = 0;

            let transition = engine.tick();

            assert_eq!(transition.snapshot.phase, TimerPhase::Break);
            assert_eq!(transition.snapshot.remaining_seconds, 300);
        }

        #[test]
        fn test_status_follows_phase() {
            let mut engine = TimerEngine::default();
            engine.start();
            assert_eq!(engine.status(), TimerStatus::RunningSession);

            tick_n(&mut engine, 1500);
            assert_eq!(engine.status(), TimerStatus::RunningBreak);
        }
    }
}
