//! Synthesized fallback tones.
//!
//! Used when no sound file is configured for a cue, or when the configured
//! file cannot be played.

use std::time::Duration;

use crate::types::AudioCue;

/// A short sine beep, optionally repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    /// Pitch of the beep
    pub frequency_hz: u32,
    /// Length of one beep
    pub duration_ms: u64,
    /// Number of beeps
    pub pulses: u8,
}

/// Silence between two pulses.
pub const PULSE_GAP_MS: u64 = 120;

/// Output volume for synthesized tones (0.0 - 1.0).
pub const TONE_VOLUME: f32 = 0.25;

impl Tone {
    /// Returns the tone played for `cue`.
    ///
    /// The start cue is a single high beep; the end cue is a lower double beep
    /// so the two are distinguishable without looking at the screen.
    #[must_use]
    pub const fn for_cue(cue: AudioCue) -> Self {
        match cue {
            AudioCue::Start => Self {
                frequency_hz: 880,
                duration_ms: 200,
                pulses: 1,
            },
            AudioCue::End => Self {
                frequency_hz: 660,
                duration_ms: 250,
                pulses: 2,
            },
        }
    }

    /// Duration of a single pulse.
    #[must_use]
    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_are_distinct() {
        assert_ne!(Tone::for_cue(AudioCue::Start), Tone::for_cue(AudioCue::End));
    }

    #[test]
    fn test_end_cue_repeats() {
        let tone = Tone::for_cue(AudioCue::End);
        assert_eq!(tone.pulses, 2);
        assert_eq!(tone.pulse_duration(), Duration::from_millis(250));
    }
}
