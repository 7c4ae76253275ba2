//! Audio output routing.
//!
//! Synthesized audio goes to exactly one place per request: the default
//! speaker or a file. [`AudioOutputConfig`] names the destination and
//! [`AudioSink`] is the seam that delivers bytes there.

mod file;
mod speaker;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::tts::{AudioData, TTSResult};

pub use file::FileSink;
pub use speaker::SpeakerSink;

/// Where synthesized audio is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AudioOutputConfig {
    /// Play through the default audio output device
    #[default]
    DefaultSpeaker,
    /// Write a file at the given path
    File(PathBuf),
}

impl AudioOutputConfig {
    /// `None` routes to the speaker, `Some(path)` to a file.
    pub fn from_path<P: AsRef<Path>>(path: Option<P>) -> Self {
        match path {
            Some(p) => Self::File(p.as_ref().to_path_buf()),
            None => Self::DefaultSpeaker,
        }
    }

    /// The output file, if any.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::DefaultSpeaker => None,
        }
    }
}

impl std::fmt::Display for AudioOutputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefaultSpeaker => write!(f, "default speaker"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Destination for synthesized audio.
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Deliver one complete utterance. Returns once the audio is persisted or
    /// has finished playing.
    async fn write(&self, audio: &AudioData) -> TTSResult<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
