//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The status line (rewritten in place on every tick)
//! - Notification toasts
//! - JSON updates
//! - Help and error messages

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::warn;

use super::input::HELP_TEXT;
use crate::config::OutputMode;
use crate::timer::TimerUpdate;
use crate::types::{Notification, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Terminal output for one interactive session.
///
/// Clones share the same terminal line state.
#[derive(Debug, Clone)]
pub struct Display {
    mode: OutputMode,
    line_open: Rc<Cell<bool>>,
}

impl Display {
    /// Creates a display writing in `mode`.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            line_open: Rc::new(Cell::new(false)),
        }
    }

    /// Renders the one-line status summary.
    pub fn render_status_line(snapshot: &TimerSnapshot) -> String {
        let state = if snapshot.running { "running" } else { "idle" };
        format!(
            "[{}] {} {}  (session {}m / break {}m)",
            snapshot.phase.label(),
            snapshot.display,
            state,
            snapshot.session_minutes,
            snapshot.break_minutes
        )
    }

    /// Renders a notification as a terminal toast.
    pub fn render_toast(notification: &Notification) -> String {
        format!(
            "[{}] {}: {}",
            notification.severity.as_str(),
            notification.title,
            notification.body
        )
    }

    /// Renders an update as one JSON line.
    pub fn render_json(update: &TimerUpdate) -> serde_json::Result<String> {
        serde_json::to_string(update)
    }

    /// Shows a timer update.
    ///
    /// In human mode plain ticks rewrite the current line; everything else
    /// ends it and prints on fresh lines.
    pub fn show_update(&self, update: &TimerUpdate) {
        match self.mode {
            OutputMode::Json => match Self::render_json(update) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to serialize update: {}", e),
            },
            OutputMode::Human => {
                let status = Self::render_status_line(&update.snapshot);
                if update.is_plain_tick() {
                    print!("\r{}", status);
                    let _ = io::stdout().flush();
                    self.line_open.set(true);
                    return;
                }

                self.close_line();
                println!("{}", status);
                for notification in update.effects.iter().filter_map(|e| e.as_notification()) {
                    println!("{}", Self::render_toast(notification));
                }
            }
        }
    }

    /// Shows the greeting printed before the first update.
    pub fn show_banner(&self) {
        if self.mode == OutputMode::Human {
            println!("Pomodoro timer. Type `s` to start, `h` for help, `q` to quit.");
        }
    }

    /// Shows the key help.
    pub fn show_help(&self) {
        match self.mode {
            OutputMode::Human => {
                self.close_line();
                println!("{}", HELP_TEXT);
            }
            OutputMode::Json => eprintln!("{}", HELP_TEXT),
        }
    }

    /// Shows the hint for an unrecognized input line.
    pub fn show_unknown(&self, input: &str) {
        let message = format!("Unknown command: '{}' (type `help` for a list)", input);
        match self.mode {
            OutputMode::Human => {
                self.close_line();
                println!("{}", message);
            }
            OutputMode::Json => eprintln!("{}", message),
        }
    }

    /// Ends a line left open by a tick.
    pub fn close_line(&self) {
        if self.line_open.replace(false) {
            println!();
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::content::{create_session_paused_content, create_session_started_content};
    use crate::timer::UpdateSource;
    use crate::types::{Effect, TimerPhase, TimerState};

    fn snapshot() -> TimerSnapshot {
        TimerSnapshot::from_timer_state(&TimerState::default())
    }

    // ------------------------------------------------------------------------
    // Status Line Tests
    // ------------------------------------------------------------------------

    mod status_line_tests {
        use super::*;

        #[test]
        fn test_idle_status_line() {
            assert_eq!(
                Display::render_status_line(&snapshot()),
                "[Session] 25:00 idle  (session 25m / break 5m)"
            );
        }

        #[test]
        fn test_running_break_status_line() {
            let mut snap = snapshot();
            snap.running = true;
            snap.phase = TimerPhase::Break;
            snap.remaining_seconds = 299;
            snap.display = "04:59".to_string();

            assert_eq!(
                Display::render_status_line(&snap),
                "[Break] 04:59 running  (session 25m / break 5m)"
            );
        }
    }

    // ------------------------------------------------------------------------
    // Toast Tests
    // ------------------------------------------------------------------------

    mod toast_tests {
        use super::*;

        #[test]
        fn test_success_toast() {
            let toast = Display::render_toast(&create_session_started_content(25));
            assert!(toast.starts_with("[success] Pomodoro started: "));
            assert!(toast.contains("25 minutes"));
        }

        #[test]
        fn test_info_toast() {
            let toast = Display::render_toast(&create_session_paused_content());
            assert_eq!(
                toast,
                "[info] Pomodoro paused: Your pomodoro timer has been paused."
            );
        }
    }

    // ------------------------------------------------------------------------
    // JSON Tests
    // ------------------------------------------------------------------------

    mod json_tests {
        use super::*;

        #[test]
        fn test_render_json_update() {
            let update = TimerUpdate {
                source: UpdateSource::Tick,
                snapshot: snapshot(),
                effects: vec![Effect::cue(crate::types::AudioCue::End)],
            };
            let line = Display::render_json(&update).unwrap();
            let value: serde_json::Value = serde_json::from_str(&line).unwrap();

            assert_eq!(value["source"], "tick");
            assert_eq!(value["snapshot"]["remainingSeconds"], 1500);
            assert_eq!(value["snapshot"]["display"], "25:00");
            assert_eq!(value["effects"][0]["kind"], "audio_cue");
            assert_eq!(value["effects"][0]["cue"], "end");
            assert!(!line.contains('\n'));
        }
    }

    #[test]
    fn test_close_line_resets_state() {
        let display = Display::new(OutputMode::Human);
        let shared = display.clone();
        display.line_open.set(true);

        shared.close_line();

        assert!(!display.line_open.get());
    }
}
