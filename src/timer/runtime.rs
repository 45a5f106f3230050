//! Event loop serializing user commands and ticks through the engine.
//!
//! ```text
//! commands ──┐
//!            ├─▶ select! ─▶ TimerEngine ─▶ TimerUpdate ─▶ updates
//! ticker ────┘                  │
//!    ▲                          │
//!    └──── sync(running) ◀──────┘
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::engine::{TimerEngine, Transition};
use super::ticker::Ticker;
use crate::types::{Direction, Effect, TimerSnapshot};

// ============================================================================
// Command
// ============================================================================

/// User request forwarded to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Change the break length
    AdjustBreak(Direction),
    /// Change the session length
    AdjustSession(Direction),
    /// Start or resume
    Start,
    /// Pause
    Pause,
    /// Reset to an idle session
    Restart,
    /// Publish the current snapshot without touching state
    Refresh,
}

// ============================================================================
// TimerUpdate
// ============================================================================

/// What caused an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateSource {
    /// State when the runtime came up
    Initial,
    /// A user command
    Command(Command),
    /// One second elapsed
    Tick,
}

/// Committed engine state plus the effects to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerUpdate {
    pub source: UpdateSource,
    pub snapshot: TimerSnapshot,
    pub effects: Vec<Effect>,
}

impl TimerUpdate {
    fn new(source: UpdateSource, transition: Transition) -> Self {
        Self {
            source,
            snapshot: transition.snapshot,
            effects: transition.effects,
        }
    }

    /// Returns true for a plain countdown step with nothing else to report.
    #[must_use]
    pub fn is_plain_tick(&self) -> bool {
        self.source == UpdateSource::Tick && self.effects.is_empty()
    }
}

// ============================================================================
// TimerRuntime
// ============================================================================

enum Step {
    Command(Command),
    Tick,
    Shutdown,
}

/// Owns the engine and the ticker for the lifetime of a session.
pub struct TimerRuntime {
    engine: TimerEngine,
    ticker: Ticker,
    commands_rx: mpsc::UnboundedReceiver<Command>,
    updates_tx: mpsc::UnboundedSender<TimerUpdate>,
}

impl TimerRuntime {
    /// Creates a runtime around `engine`.
    pub fn new(
        engine: TimerEngine,
        commands_rx: mpsc::UnboundedReceiver<Command>,
        updates_tx: mpsc::UnboundedSender<TimerUpdate>,
    ) -> Self {
        Self {
            engine,
            ticker: Ticker::new(),
            commands_rx,
            updates_tx,
        }
    }

    /// Runs until the command channel closes, then returns the engine.
    ///
    /// An initial update carrying the starting snapshot is sent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the update receiver has been dropped.
    pub async fn run(mut self) -> Result<TimerEngine> {
        info!("Timer runtime started");
        self.ticker.sync(self.engine.is_running());
        self.publish(
            UpdateSource::Initial,
            Transition {
                snapshot: self.engine.snapshot(),
                effects: Vec::new(),
            },
        )?;

        loop {
            let step = tokio::select! {
                biased;
                command = self.commands_rx.recv() => match command {
                    Some(command) => Step::Command(command),
                    None => Step::Shutdown,
                },
                _ = self.ticker.tick() => Step::Tick,
            };

            let (source, transition) = match step {
                Step::Command(command) => {
                    debug!("command: {:?}", command);
                    (UpdateSource::Command(command), self.apply(command))
                }
                Step::Tick => (UpdateSource::Tick, self.engine.tick()),
                Step::Shutdown => break,
            };

            self.ticker.sync(self.engine.is_running());
            self.publish(source, transition)?;
        }

        info!("Timer runtime stopped");
        Ok(self.engine)
    }

    fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::AdjustBreak(direction) => self.engine.adjust_break(direction),
            Command::AdjustSession(direction) => self.engine.adjust_session(direction),
            Command::Start => self.engine.start(),
            Command::Pause => self.engine.pause(),
            Command::Restart => self.engine.restart(),
            Command::Refresh => Transition {
                snapshot: self.engine.snapshot(),
                effects: Vec::new(),
            },
        }
    }

    fn publish(&self, source: UpdateSource, transition: Transition) -> Result<()> {
        self.updates_tx
            .send(TimerUpdate::new(source, transition))
            .context("Failed to send timer update")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioCue, TimerConfig, TimerPhase};
    use tokio::time::{advance, Duration};

    struct Harness {
        commands_tx: mpsc::UnboundedSender<Command>,
        updates_rx: mpsc::UnboundedReceiver<TimerUpdate>,
        handle: tokio::task::JoinHandle<Result<TimerEngine>>,
    }

    fn spawn_runtime(config: &TimerConfig) -> Harness {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let runtime = TimerRuntime::new(TimerEngine::new(config), commands_rx, updates_tx);
        Harness {
            commands_tx,
            updates_rx,
            handle: tokio::spawn(runtime.run()),
        }
    }

    mod command_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_initial_update() {
            let mut h = spawn_runtime(&TimerConfig::default());

            let update = h.updates_rx.recv().await.unwrap();
            assert_eq!(update.source, UpdateSource::Initial);
            assert_eq!(update.snapshot.display, "25:00");
            assert!(update.effects.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_command_produces_update() {
            let mut h = spawn_runtime(&TimerConfig::default());
            h.updates_rx.recv().await.unwrap();

            h.commands_tx
                .send(Command::AdjustBreak(Direction::Increment))
                .unwrap();
            let update = h.updates_rx.recv().await.unwrap();

            assert_eq!(
                update.source,
                UpdateSource::Command(Command::AdjustBreak(Direction::Increment))
            );
            assert_eq!(update.snapshot.break_minutes, 6);
        }

        #[tokio::test(start_paused = true)]
        async fn test_refresh_republishes_snapshot() {
            let mut h = spawn_runtime(&TimerConfig::default());
            let initial = h.updates_rx.recv().await.unwrap();

            h.commands_tx.send(Command::Refresh).unwrap();
            let update = h.updates_rx.recv().await.unwrap();

            assert_eq!(update.snapshot, initial.snapshot);
            assert!(update.effects.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_shutdown_returns_engine() {
            let mut h = spawn_runtime(&TimerConfig::default());
            h.updates_rx.recv().await.unwrap();
            h.commands_tx.send(Command::Start).unwrap();
            h.updates_rx.recv().await.unwrap();

            drop(h.commands_tx);
            let engine = h.handle.await.unwrap().unwrap();

            assert!(engine.is_running());
        }

        #[tokio::test(start_paused = true)]
        async fn test_dropped_receiver_is_error() {
            let h = spawn_runtime(&TimerConfig::default());
            drop(h.updates_rx);

            let result = h.handle.await.unwrap();
            assert!(result.is_err());
        }
    }

    mod tick_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_idle_runtime_does_not_tick() {
            let mut h = spawn_runtime(&TimerConfig::default());
            h.updates_rx.recv().await.unwrap();

            advance(Duration::from_secs(30)).await;

            assert!(h.updates_rx.try_recv().is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_running_runtime_ticks_every_second() {
            let mut h = spawn_runtime(&TimerConfig::default());
            h.updates_rx.recv().await.unwrap();
            h.commands_tx.send(Command::Start).unwrap();
            h.updates_rx.recv().await.unwrap();

            for expected in ["24:59", "24:58", "24:57"] {
                let update = h.updates_rx.recv().await.unwrap();
                assert!(update.is_plain_tick());
                assert_eq!(update.snapshot.display, expected);
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_stops_ticks() {
            let mut h = spawn_runtime(&TimerConfig::default());
            h.updates_rx.recv().await.unwrap();
            h.commands_tx.send(Command::Start).unwrap();
            h.updates_rx.recv().await.unwrap();
            h.updates_rx.recv().await.unwrap();

            h.commands_tx.send(Command::Pause).unwrap();
            let paused = h.updates_rx.recv().await.unwrap();
            assert_eq!(paused.snapshot.remaining_seconds, 1499);

            advance(Duration::from_secs(10)).await;
            assert!(h.updates_rx.try_recv().is_err());
        }

        #[tokio::test(start_paused = true)]
        async fn test_full_cycle() {
            let config = TimerConfig::default()
                .with_session_minutes(1)
                .with_break_minutes(1);
            let mut h = spawn_runtime(&config);
            h.updates_rx.recv().await.unwrap();
            h.commands_tx.send(Command::Start).unwrap();
            let started = h.updates_rx.recv().await.unwrap();
            assert_eq!(started.effects.len(), 2);

            let mut last = None;
            for _ in 0..60 {
                last = h.updates_rx.recv().await;
            }
            let to_break = last.unwrap();
            assert_eq!(to_break.snapshot.phase, TimerPhase::Break);
            assert!(to_break.snapshot.running);
            assert_eq!(to_break.effects[1], Effect::cue(AudioCue::End));

            let mut last = None;
            for _ in 0..60 {
                last = h.updates_rx.recv().await;
            }
            let to_session = last.unwrap();
            assert_eq!(to_session.snapshot.phase, TimerPhase::Session);
            assert!(!to_session.snapshot.running);
            assert_eq!(to_session.snapshot.remaining_seconds, 60);

            advance(Duration::from_secs(5)).await;
            assert!(h.updates_rx.try_recv().is_err());
        }
    }
}
