//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine, tick source and the runtime loop driving them
//! - Effect execution (desktop notifications and audio cues)
//! - Sound playback with synthesized tone fallback
//! - CLI command parsing, terminal input and display utilities
//! - Type definitions for configuration, state and effects

pub mod cli;
pub mod config;
pub mod effects;
pub mod notification;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigError, OutputMode, SoundConfig};
pub use effects::EffectExecutor;
pub use timer::{Command, TimerEngine, TimerRuntime, TimerUpdate, Transition, UpdateSource};
pub use types::{
    AudioCue, Direction, Effect, Notification, NotificationKind, Severity, TimerConfig,
    TimerPhase, TimerSnapshot, TimerState, TimerStatus,
};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotificationSender, NotificationError, NotificationSender,
};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
