//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and state
//! - Timer configuration with validation
//! - Read-only snapshots handed to the presentation layer
//! - Effects (notifications and audio cues) emitted by the engine

pub mod content;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Smallest length, in minutes, a session or break may be set to.
pub const MIN_MINUTES: u32 = 1;

/// Default work session length in minutes.
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Default break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// How long a notification stays visible, in milliseconds.
pub const NOTIFICATION_DURATION_MS: u32 = 5000;

// ============================================================================
// TimerPhase
// ============================================================================

/// Which countdown is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Work session countdown
    #[default]
    Session,
    /// Break countdown
    Break,
}

impl TimerPhase {
    /// Returns the label shown above the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Session => "Session",
            TimerPhase::Break => "Break",
        }
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Machine state derived from `(running, phase)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Not counting down (either phase)
    Idle,
    /// Counting down a work session
    RunningSession,
    /// Counting down a break
    RunningBreak,
}

impl TimerStatus {
    /// Derives the status from the running flag and the current phase.
    #[must_use]
    pub const fn derive(running: bool, phase: TimerPhase) -> Self {
        match (running, phase) {
            (false, _) => TimerStatus::Idle,
            (true, TimerPhase::Session) => TimerStatus::RunningSession,
            (true, TimerPhase::Break) => TimerStatus::RunningBreak,
        }
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Direction of a length adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// Applies the adjustment to `minutes`.
    ///
    /// Returns `None` when the adjustment would go below [`MIN_MINUTES`].
    pub fn apply(self, minutes: u32) -> Option<u32> {
        match self {
            Direction::Increment => Some(minutes.saturating_add(1)),
            Direction::Decrement if minutes > MIN_MINUTES => Some(minutes - 1),
            Direction::Decrement => None,
        }
    }
}

/// Converts a length in minutes to seconds.
pub fn minutes_to_seconds(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

/// Renders seconds as a zero-padded `MM:SS` countdown.
///
/// Minutes are not capped, so 100 minutes renders as `100:00`.
pub fn format_display(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Initial lengths the engine starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Work session length in minutes (>= 1)
    pub session_minutes: u32,
    /// Break length in minutes (>= 1)
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_minutes: DEFAULT_SESSION_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerConfig {
    /// Sets the session length.
    pub fn with_session_minutes(mut self, minutes: u32) -> Self {
        self.session_minutes = minutes;
        self
    }

    /// Sets the break length.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_minutes < MIN_MINUTES {
            return Err(ConfigError::InvalidLength {
                name: "session",
                value: self.session_minutes,
            });
        }
        if self.break_minutes < MIN_MINUTES {
            return Err(ConfigError::InvalidLength {
                name: "break",
                value: self.break_minutes,
            });
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Mutable state owned by the timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Configured break length in minutes
    pub break_minutes: u32,
    /// Configured session length in minutes
    pub session_minutes: u32,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Current phase
    pub phase: TimerPhase,
    /// Whether the countdown is ticking
    pub running: bool,
}

impl TimerState {
    /// Creates an idle state at the top of a fresh session.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            break_minutes: config.break_minutes.max(MIN_MINUTES),
            session_minutes: config.session_minutes.max(MIN_MINUTES),
            remaining_seconds: minutes_to_seconds(config.session_minutes.max(MIN_MINUTES)),
            phase: TimerPhase::Session,
            running: false,
        }
    }

    /// Length of a full session in seconds.
    pub fn session_seconds(&self) -> u32 {
        minutes_to_seconds(self.session_minutes)
    }

    /// Length of a full break in seconds.
    pub fn break_seconds(&self) -> u32 {
        minutes_to_seconds(self.break_minutes)
    }

    /// True when the countdown sits exactly at the length of a full session.
    pub fn is_at_session_start(&self) -> bool {
        self.remaining_seconds == self.session_seconds()
    }

    /// Returns the `MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_display(self.remaining_seconds)
    }

    /// Returns the derived machine state.
    pub fn status(&self) -> TimerStatus {
        TimerStatus::derive(self.running, self.phase)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(&TimerConfig::default())
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Immutable view of the timer state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub break_minutes: u32,
    pub session_minutes: u32,
    pub remaining_seconds: u32,
    /// `MM:SS` rendering of `remaining_seconds`
    pub display: String,
    pub phase: TimerPhase,
    pub running: bool,
}

impl TimerSnapshot {
    /// Creates a snapshot from timer state.
    pub fn from_timer_state(state: &TimerState) -> Self {
        Self {
            break_minutes: state.break_minutes,
            session_minutes: state.session_minutes,
            remaining_seconds: state.remaining_seconds,
            display: state.display(),
            phase: state.phase,
            running: state.running,
        }
    }

    /// Returns the derived machine state.
    pub fn status(&self) -> TimerStatus {
        TimerStatus::derive(self.running, self.phase)
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Named audio asset the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    /// Played when a fresh session starts
    Start,
    /// Played when a session or break runs out
    End,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Start => "start",
            AudioCue::End => "end",
        }
    }
}

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
        }
    }
}

/// Which engine event a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SessionStarted,
    SessionResumed,
    SessionPaused,
    SessionRestarted,
    SessionCompleted,
    BreakCompleted,
}

/// Notification the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Engine event this notification announces
    pub event: NotificationKind,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    /// How long the notification stays visible
    pub duration_ms: u32,
    /// Whether the user may close it early
    pub dismissible: bool,
}

/// Side-effecting instruction emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Show a notification
    Notification(Notification),
    /// Play a named audio cue
    AudioCue { cue: AudioCue },
}

impl Effect {
    /// Wraps a notification.
    pub fn notification(notification: Notification) -> Self {
        Effect::Notification(notification)
    }

    /// Wraps an audio cue.
    pub fn cue(cue: AudioCue) -> Self {
        Effect::AudioCue { cue }
    }

    /// Returns the notification if this effect is one.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Effect::Notification(n) => Some(n),
            Effect::AudioCue { .. } => None,
        }
    }

    /// Returns the audio cue if this effect is one.
    pub fn as_cue(&self) -> Option<AudioCue> {
        match self {
            Effect::AudioCue { cue } => Some(*cue),
            Effect::Notification(_) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
