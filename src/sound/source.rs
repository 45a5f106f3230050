//! Sound source management.
//!
//! A cue is played either from an audio file supplied on the command line or
//! from a synthesized [`Tone`]. File sources carry the tone to fall back to.

use std::path::{Path, PathBuf};

use super::error::SoundError;
use super::tone::Tone;
use crate::types::AudioCue;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the file.
        path: PathBuf,
        /// Tone played if the file cannot be.
        fallback: Tone,
    },
    /// A synthesized beep.
    Tone {
        /// The cue the tone belongs to.
        cue: AudioCue,
        /// Tone parameters.
        tone: Tone,
    },
}

impl SoundSource {
    /// Creates a file source.
    ///
    /// This constructor does not validate the path; see [`SoundSource::validate_file`].
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>, fallback: Tone) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
            fallback,
        }
    }

    /// Creates a file source for `cue`, named after the file stem.
    #[must_use]
    pub fn cue_file(path: impl AsRef<Path>, cue: AudioCue) -> Self {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| cue.as_str().to_string());
        Self::file(name, path, Tone::for_cue(cue))
    }

    /// Creates the synthesized tone source for `cue`.
    #[must_use]
    pub fn tone(cue: AudioCue) -> Self {
        Self::Tone {
            cue,
            tone: Tone::for_cue(cue),
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Tone { cue, .. } => cue.as_str(),
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }

    /// Checks that `path` is an existing file with a supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the file does not exist and
    /// `SoundError::UnsupportedFormat` if its extension is not playable.
    pub fn validate_file(path: &Path) -> Result<(), SoundError> {
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SoundError::UnsupportedFormat(format!(
                "{} (expected one of: {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }

        Ok(())
    }
}
