//! Application configuration.
//!
//! Everything here is assembled from command-line arguments at startup and
//! lives only for the duration of the process; nothing is read from or
//! written to disk.

use std::path::PathBuf;

use thiserror::Error;

use crate::sound::{SoundError, SoundSource};
use crate::types::{AudioCue, TimerConfig};

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A session or break length below one minute.
    #[error("{name} length must be at least 1 minute (got {value})")]
    InvalidLength { name: &'static str, value: u32 },

    /// A configured cue file cannot be used.
    #[error("invalid {cue} sound file")]
    SoundFile {
        cue: &'static str,
        #[source]
        source: SoundError,
    },
}

impl ConfigError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidLength { .. } => "pass a value of 1 or more",
            Self::SoundFile { source, .. } => source.suggestion(),
        }
    }
}

/// How updates are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable status lines and toasts
    #[default]
    Human,
    /// One JSON object per update
    Json,
}

/// Audio cue settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundConfig {
    /// Whether cues are played at all
    pub enabled: bool,
    /// File played for the start cue (synthesized tone if absent)
    pub start_file: Option<PathBuf>,
    /// File played for the end cue (synthesized tone if absent)
    pub end_file: Option<PathBuf>,
}

impl SoundConfig {
    /// Resolves the sound source used for `cue`.
    pub fn source_for(&self, cue: AudioCue) -> SoundSource {
        let file = match cue {
            AudioCue::Start => self.start_file.as_ref(),
            AudioCue::End => self.end_file.as_ref(),
        };
        match file {
            Some(path) => SoundSource::cue_file(path, cue),
            None => SoundSource::tone(cue),
        }
    }

    /// Checks that every configured cue file is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (cue, file) in [
            (AudioCue::Start, &self.start_file),
            (AudioCue::End, &self.end_file),
        ] {
            if let Some(path) = file {
                SoundSource::validate_file(path).map_err(|source| ConfigError::SoundFile {
                    cue: cue.as_str(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

/// Full configuration of an interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Initial session/break lengths
    pub timer: TimerConfig,
    /// Audio cue settings
    pub sound: SoundConfig,
    /// Whether desktop notifications are sent
    pub desktop_notifications: bool,
    /// Output format
    pub output: OutputMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            sound: SoundConfig {
                enabled: true,
                ..SoundConfig::default()
            },
            desktop_notifications: true,
            output: OutputMode::Human,
        }
    }
}

impl AppConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate()?;
        if self.sound.enabled {
            self.sound.validate()?;
        }
        Ok(())
    }
}
