//! File output.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::AudioSink;
use crate::core::tts::{AudioData, TTSError, TTSResult};

/// Writes audio to a file, wrapping headerless PCM in a WAV container.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Wrap 16-bit little-endian mono PCM in a WAV container.
pub(crate) fn encode_wav(pcm: &[u8], sample_rate: u32) -> TTSResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(pcm.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| TTSError::AudioGenerationFailed(format!("WAV header: {e}")))?;
        for sample in pcm.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .map_err(|e| TTSError::AudioGenerationFailed(format!("WAV sample: {e}")))?;
        }
        writer
            .finalize()
            .map_err(|e| TTSError::AudioGenerationFailed(format!("WAV finalize: {e}")))?;
    }

    Ok(cursor.into_inner())
}

#[async_trait]
impl AudioSink for FileSink {
    async fn write(&self, audio: &AudioData) -> TTSResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        if audio.is_raw_pcm() {
            let wav = encode_wav(&audio.data, audio.sample_rate)?;
            debug!(path = %self.path.display(), bytes = wav.len(), "Writing PCM as WAV");
            tokio::fs::write(&self.path, wav).await?;
        } else {
            debug!(path = %self.path.display(), bytes = audio.data.len(), "Writing audio file");
            tokio::fs::write(&self.path, &audio.data).await?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
