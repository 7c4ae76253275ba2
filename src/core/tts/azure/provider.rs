//! Azure text-to-speech adapter.
//!
//! # API Reference
//!
//! - Synthesis: `POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
//!   with an SSML body, `Ocp-Apim-Subscription-Key` and `X-Microsoft-OutputFormat`
//! - Voices: `GET https://{region}.tts.speech.microsoft.com/cognitiveservices/voices/list`

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};
use zeroize::Zeroizing;

use super::config::{
    AzureAudioEncoding, AzureRegion, AzureTTSConfig, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use super::ssml::{Prosody, build_ssml};
use super::voices::{Voice, voices_for_locale};
use crate::core::audio::{AudioOutputConfig, AudioSink, FileSink, SpeakerSink};
use crate::core::tts::base::{AudioData, TTSError, TTSResult};
use crate::utils::validate_endpoint_url;

/// Synthesis endpoint for the default region (documentation and tests).
pub const AZURE_TTS_URL: &str = "https://japaneast.tts.speech.microsoft.com/cognitiveservices/v1";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const USER_AGENT: &str = concat!("azure-tts/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Request options and outcome
// =============================================================================

/// Per-call synthesis options.
///
/// ```rust
/// use azure_tts::core::tts::azure::SynthesisOptions;
///
/// let options = SynthesisOptions::new()
///     .with_voice("ja-JP-KeitaNeural")
///     .with_rate("1.5")
///     .with_output_file("output.wav");
/// assert!(options.output.file_path().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    /// Voice short name; falls back to the configured default voice
    pub voice: Option<String>,
    /// Destination of the audio
    pub output: AudioOutputConfig,
    /// Optional prosody adjustments
    pub prosody: Prosody,
}

impl SynthesisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_output_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.output = AudioOutputConfig::File(path.into());
        self
    }

    pub fn with_output(mut self, output: AudioOutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.prosody.rate = Some(rate.into());
        self
    }

    pub fn with_pitch(mut self, pitch: impl Into<String>) -> Self {
        self.prosody.pitch = Some(pitch.into());
        self
    }

    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.prosody.volume = Some(volume.into());
        self
    }
}

/// Result of a completed synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Where the audio went
    pub output: AudioOutputConfig,
    /// Voice that spoke
    pub voice: String,
    /// Bytes received from the service
    pub audio_bytes: usize,
    /// Format requested from the service
    pub format: AzureAudioEncoding,
}

// =============================================================================
// Error classification
// =============================================================================

/// Map a non-success HTTP status to a [`TTSError`].
pub(crate) fn classify_error(status: StatusCode, body: &str) -> TTSError {
    match status.as_u16() {
        400 => TTSError::InvalidConfiguration(format!(
            "Bad request - check SSML and voice name: {body}"
        )),
        401 => TTSError::AuthenticationFailed(format!(
            "Invalid subscription key or wrong region: {body}"
        )),
        403 => TTSError::AuthenticationFailed(format!(
            "Access forbidden - check the Speech resource: {body}"
        )),
        404 => TTSError::InvalidConfiguration(format!(
            "Endpoint not found - check the region: {body}"
        )),
        415 => TTSError::InvalidConfiguration(format!("Unsupported content type: {body}")),
        429 => TTSError::RateLimited(format!("Too many requests: {body}")),
        500..=599 => TTSError::ProviderError(format!("Server error ({status}): {body}")),
        _ => TTSError::ProviderError(format!("TTS API error ({status}): {body}")),
    }
}

// =============================================================================
// Azure TTS adapter
// =============================================================================

/// Azure Speech text-to-speech adapter.
///
/// Holds the credentials and one HTTP client. Each call is a single
/// request/response round trip; nothing is retried or cached. Building the
/// adapter does not touch the network.
///
/// # Example
///
/// ```rust,no_run
/// use azure_tts::core::tts::azure::{AzureTTS, SynthesisOptions};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let tts = AzureTTS::new("my-key", "japaneast")?;
/// tts.text_to_speech("こんにちは", SynthesisOptions::new()).await?;
/// tts.text_to_speech(
///     "こんにちは",
///     SynthesisOptions::new().with_output_file("hello.wav"),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub struct AzureTTS {
    config: AzureTTSConfig,
    subscription_key: Zeroizing<String>,
    client: Client,
    speaker: Arc<dyn AudioSink>,
    /// Request counter for logging
    request_counter: AtomicU64,
}

impl AzureTTS {
    /// Create an adapter for a subscription key and region.
    pub fn new(subscription_key: impl Into<String>, region: &str) -> TTSResult<Self> {
        if region.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Region is required".to_string(),
            ));
        }
        Self::from_config(AzureTTSConfig::new(subscription_key, region))
    }

    /// Create an adapter from a full configuration.
    pub fn from_config(mut config: AzureTTSConfig) -> TTSResult<Self> {
        config.validate().map_err(TTSError::InvalidConfiguration)?;

        if let Some(ref endpoint) = config.endpoint {
            validate_endpoint_url(endpoint)
                .map_err(|e| TTSError::InvalidConfiguration(e.to_string()))?;
        }

        if !config.region.is_known() && config.endpoint.is_none() {
            debug!(region = %config.region, "Using region not in the known region table");
        }

        let subscription_key = Zeroizing::new(std::mem::take(&mut config.base.api_key));

        let client = Client::builder()
            .timeout(Duration::from_secs(
                config
                    .base
                    .request_timeout
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ))
            .connect_timeout(Duration::from_secs(
                config
                    .base
                    .connection_timeout
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                TTSError::InternalError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            subscription_key,
            client,
            speaker: Arc::new(SpeakerSink::new()),
            request_counter: AtomicU64::new(0),
        })
    }

    /// Replace the sink used for speaker output.
    pub fn with_speaker_sink(mut self, sink: Arc<dyn AudioSink>) -> Self {
        self.speaker = sink;
        self
    }

    /// Configured region.
    pub fn region(&self) -> &AzureRegion {
        &self.config.region
    }

    /// Configured output format.
    pub fn output_format(&self) -> AzureAudioEncoding {
        self.config.output_format
    }

    /// Voice used when a request names none.
    pub fn default_voice(&self) -> &str {
        self.config.default_voice()
    }

    /// Configuration, with the subscription key already removed.
    pub fn azure_config(&self) -> &AzureTTSConfig {
        &self.config
    }

    /// Convert text to speech and route the audio to the requested output.
    pub async fn text_to_speech(
        &self,
        text: &str,
        options: SynthesisOptions,
    ) -> TTSResult<SynthesisOutcome> {
        let voice = options
            .voice
            .clone()
            .unwrap_or_else(|| self.default_voice().to_string());

        let audio_bytes = self.synthesize(text, &options).await?;
        let format = self.config.output_format;
        let audio = AudioData::new(Vec::from(audio_bytes), format.sample_rate(), format.as_str());

        match options.output {
            AudioOutputConfig::DefaultSpeaker => {
                self.speaker.write(&audio).await?;
                info!(voice = %voice, sink = self.speaker.name(), "Playback finished");
            }
            AudioOutputConfig::File(ref path) => {
                FileSink::new(path).write(&audio).await?;
                info!(voice = %voice, path = %path.display(), "Audio saved");
            }
        }

        Ok(SynthesisOutcome {
            output: options.output,
            voice,
            audio_bytes: audio.data.len(),
            format,
        })
    }

    /// Run one synthesis request and return the audio bytes.
    pub async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> TTSResult<Bytes> {
        if text.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Text to synthesize must not be empty".to_string(),
            ));
        }

        let voice = options.voice.as_deref().unwrap_or(self.default_voice());
        if voice.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Voice name must not be empty".to_string(),
            ));
        }

        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let ssml = build_ssml(text, voice, &options.prosody);

        debug!(
            request_id = request_id,
            text_len = text.len(),
            voice = %voice,
            format = %self.config.output_format,
            prosody = !options.prosody.is_empty(),
            "Synthesizing text with Azure TTS"
        );

        let response = self
            .client
            .post(self.config.synthesis_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key.as_str())
            .header("Content-Type", "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, self.config.output_format.as_str())
            .body(ssml)
            .send()
            .await
            .map_err(|e| {
                error!(request_id = request_id, error = %e, "Azure TTS request failed");
                TTSError::NetworkError(format!("Request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                request_id = request_id,
                status = %status,
                body = %body,
                "Azure TTS API returned error"
            );
            return Err(classify_error(status, &body));
        }

        let audio = response.bytes().await.map_err(|e| {
            error!(request_id = request_id, error = %e, "Failed to read audio response");
            TTSError::AudioGenerationFailed(format!("Failed to read audio: {e}"))
        })?;

        if audio.is_empty() {
            return Err(TTSError::AudioGenerationFailed(
                "Service returned no audio".to_string(),
            ));
        }

        debug!(
            request_id = request_id,
            audio_bytes = audio.len(),
            "Successfully synthesized audio"
        );

        Ok(audio)
    }

    /// Fetch the voices available in the configured region.
    pub async fn list_voices(&self) -> TTSResult<Vec<Voice>> {
        let response = self
            .client
            .get(self.config.voices_list_url())
            .header(SUBSCRIPTION_KEY_HEADER, self.subscription_key.as_str())
            .send()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Voice list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        let voices: Vec<Voice> = response.json().await.map_err(|e| {
            TTSError::ProviderError(format!("Failed to parse voice list: {e}"))
        })?;

        debug!(count = voices.len(), region = %self.config.region, "Fetched Azure voices");
        Ok(voices)
    }

    /// Fetch the voice list and keep the voices for `locale`.
    pub async fn voices_for_locale(&self, locale: &str) -> TTSResult<Vec<Voice>> {
        let voices = self.list_voices().await?;
        Ok(voices_for_locale(&voices, locale))
    }

    /// Static description of this adapter.
    pub fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "azure",
            "api_type": "HTTP REST",
            "region": self.config.region.as_str(),
            "endpoint": self.config.synthesis_url(),
            "default_voice": self.default_voice(),
            "output_format": self.config.output_format.as_str(),
            "sample_rate": self.config.output_format.sample_rate(),
            "features": {
                "ssml": true,
                "prosody": ["rate", "pitch", "volume"],
                "voice_list": true,
            },
            "documentation": "https://learn.microsoft.com/azure/ai-services/speech-service/rest-text-to-speech",
        })
    }
}

impl std::fmt::Debug for AzureTTS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureTTS")
            .field("config", &self.config)
            .field("subscription_key", &"<redacted>")
            .field("speaker", &self.speaker.name())
            .finish()
    }
}
