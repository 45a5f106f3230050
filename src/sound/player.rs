//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;
use super::tone::{Tone, PULSE_GAP_MS, TONE_VOLUME};

/// Decoder for a sound file on disk.
type FileDecoder = Decoder<BufReader<File>>;

/// What a sound source resolves to before anything reaches the device.
enum Playback<D> {
    /// A loaded file
    File(D),
    /// A synthesized tone
    Tone(Tone),
}

/// Resolves `source`, loading files with `load`.
///
/// A file that cannot be opened or decoded resolves to the source's fallback
/// tone; any other load error is returned.
fn resolve<D>(
    source: &SoundSource,
    load: impl FnOnce(&Path) -> Result<D, SoundError>,
) -> Result<Playback<D>, SoundError> {
    match source {
        SoundSource::File {
            name,
            path,
            fallback,
        } => match load(path) {
            Ok(decoded) => {
                debug!("Playing sound file: {}", name);
                Ok(Playback::File(decoded))
            }
            Err(e) if e.should_fallback_to_tone() => {
                warn!(
                    "Failed to play sound file '{}': {}, falling back to tone",
                    name, e
                );
                Ok(Playback::Tone(*fallback))
            }
            Err(e) => Err(e),
        },
        SoundSource::Tone { cue, tone } => {
            debug!("Playing {} tone", cue.as_str());
            Ok(Playback::Tone(*tone))
        }
    }
}

/// Opens and decodes a sound file.
fn open_decoder(path: &Path) -> Result<FileDecoder, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))
}

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
/// The output stream is not `Send`, so the player lives on the thread that
/// created it.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// If a file cannot be opened or decoded, the source's fallback tone is
    /// played instead.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created on the output stream.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match resolve(source, open_decoder)? {
            Playback::File(decoder) => self.play_decoded(decoder),
            Playback::Tone(tone) => self.play_tone(&tone),
        }
    }

    /// Plays a decoded file.
    fn play_decoded(&self, decoder: FileDecoder) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Sound file playback started (detached)");
        Ok(())
    }

    /// Plays a synthesized tone.
    fn play_tone(&self, tone: &Tone) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        // Lossless for every frequency a Tone is built with.
        let frequency = tone.frequency_hz as f32;

        for pulse in 0..tone.pulses {
            if pulse > 0 {
                sink.append(
                    SineWave::new(frequency)
                        .take_duration(Duration::from_millis(PULSE_GAP_MS))
                        .amplify(0.0),
                );
            }
            sink.append(
                SineWave::new(frequency)
                    .take_duration(tone.pulse_duration())
                    .amplify(TONE_VOLUME),
            );
        }
        sink.detach();

        debug!("Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Returns true if the audio system is available.
    ///
    /// Always true once construction succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound cues disabled: {}", e);
            None
        }
    }
}
