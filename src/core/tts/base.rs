//! Shared text-to-speech types.
//!
//! These types are provider-agnostic: the Azure adapter builds on them, and
//! the audio sinks in [`crate::core::audio`] consume [`AudioData`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while configuring, synthesizing or delivering speech.
#[derive(Debug, Error)]
pub enum TTSError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Audio generation failed: {0}")]
    AudioGenerationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio playback unavailable: {0}")]
    PlaybackUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result alias used throughout the TTS layer.
pub type TTSResult<T> = Result<T, TTSError>;

/// Base TTS configuration.
///
/// Provider-specific configs embed this and add their own fields.
/// The API key is never serialized and is redacted from `Debug` output.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TTSConfig {
    /// Provider name, e.g. `"azure"`
    #[serde(default)]
    pub provider: String,
    /// Provider credential
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Voice identifier
    #[serde(default)]
    pub voice_id: Option<String>,
    /// Provider-specific output format name
    #[serde(default)]
    pub audio_format: Option<String>,
    /// Output sample rate in Hz
    #[serde(default)]
    pub sample_rate: Option<u32>,
    /// Connect timeout in seconds
    #[serde(default)]
    pub connection_timeout: Option<u64>,
    /// Whole-request timeout in seconds
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

impl std::fmt::Debug for TTSConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TTSConfig")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("voice_id", &self.voice_id)
            .field("audio_format", &self.audio_format)
            .field("sample_rate", &self.sample_rate)
            .field("connection_timeout", &self.connection_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

pub(crate) fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

/// A block of synthesized audio.
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Encoded audio bytes exactly as returned by the provider
    pub data: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Provider format name (for Azure, the `X-Microsoft-OutputFormat` value)
    pub format: String,
    /// Duration, when it can be derived from the byte count
    pub duration_ms: Option<u32>,
}

impl AudioData {
    /// Whether the payload is headerless 16-bit mono PCM.
    pub fn is_raw_pcm(&self) -> bool {
        self.format.starts_with("raw-") && self.format.ends_with("16bit-mono-pcm")
    }

    /// Build an `AudioData`, deriving the duration for raw PCM payloads.
    pub fn new(data: Vec<u8>, sample_rate: u32, format: impl Into<String>) -> Self {
        let mut audio = Self {
            data,
            sample_rate,
            format: format.into(),
            duration_ms: None,
        };
        if audio.is_raw_pcm() && sample_rate > 0 {
            let samples = (audio.data.len() / 2) as u64;
            audio.duration_ms = Some((samples * 1000 / sample_rate as u64) as u32);
        }
        audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = TTSConfig {
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = TTSConfig {
            provider: "azure".to_string(),
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("azure"));
    }

    #[test]
    fn test_raw_pcm_duration() {
        // 1 second of 16 kHz 16-bit mono audio
        let audio = AudioData::new(vec![0u8; 32000], 16000, "raw-16khz-16bit-mono-pcm");
        assert!(audio.is_raw_pcm());
        assert_eq!(audio.duration_ms, Some(1000));
    }

    #[test]
    fn test_container_format_has_no_duration() {
        let audio = AudioData::new(vec![0u8; 64], 24000, "riff-24khz-16bit-mono-pcm");
        assert!(!audio.is_raw_pcm());
        assert_eq!(audio.duration_ms, None);
    }
}
