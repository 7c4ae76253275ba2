//! Default speaker output.
//!
//! Playback uses `rodio` and is compiled in with the `playback` feature.
//! Without it, routing audio to the speaker fails with
//! [`TTSError::PlaybackUnavailable`].

use async_trait::async_trait;
use tracing::debug;

use super::AudioSink;
use crate::core::tts::{AudioData, TTSError, TTSResult};

/// Plays audio on the default output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerSink;

impl SpeakerSink {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioSink for SpeakerSink {
    #[cfg(feature = "playback")]
    async fn write(&self, audio: &AudioData) -> TTSResult<()> {
        let audio = audio.clone();
        debug!(
            bytes = audio.data.len(),
            format = %audio.format,
            "Playing audio on default output device"
        );
        tokio::task::spawn_blocking(move || play_blocking(audio))
            .await
            .map_err(|e| TTSError::InternalError(format!("Playback task failed: {e}")))?
    }

    #[cfg(not(feature = "playback"))]
    async fn write(&self, audio: &AudioData) -> TTSResult<()> {
        debug!(bytes = audio.data.len(), "Speaker output requested");
        Err(TTSError::PlaybackUnavailable(
            "built without the `playback` feature; write to a file instead".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "speaker"
    }
}

#[cfg(feature = "playback")]
type PlaybackSource = Box<dyn rodio::Source<Item = i16> + Send>;

/// Turn a synthesized payload into a playable source. Raw PCM is fed as
/// samples; container formats go through the decoder.
#[cfg(feature = "playback")]
fn decode_source(audio: AudioData) -> TTSResult<PlaybackSource> {
    use std::io::Cursor;

    use rodio::{Decoder, buffer::SamplesBuffer};

    if audio.is_raw_pcm() {
        let samples: Vec<i16> = audio
            .data
            .chunks_exact(2)
            .map(|s| i16::from_le_bytes([s[0], s[1]]))
            .collect();
        return Ok(Box::new(SamplesBuffer::new(1, audio.sample_rate, samples)));
    }

    let source = Decoder::new(Cursor::new(audio.data))
        .map_err(|e| TTSError::AudioGenerationFailed(format!("Cannot decode audio: {e}")))?;
    Ok(Box::new(source))
}

#[cfg(feature = "playback")]
fn play_blocking(audio: AudioData) -> TTSResult<()> {
    use rodio::{OutputStream, Sink};

    let source = decode_source(audio)?;

    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| TTSError::PlaybackUnavailable(format!("No output device: {e}")))?;
    let sink = Sink::try_new(&handle)
        .map_err(|e| TTSError::PlaybackUnavailable(format!("Cannot open sink: {e}")))?;

    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
