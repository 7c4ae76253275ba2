//! Azure Speech Service text-to-speech configuration.
//!
//! This module defines the region table, the output format table and the
//! Azure-specific configuration that wraps the base [`TTSConfig`].
//!
//! # References
//!
//! - [REST API](https://learn.microsoft.com/azure/ai-services/speech-service/rest-text-to-speech)
//! - [Regions](https://learn.microsoft.com/azure/ai-services/speech-service/regions)

use serde::{Deserialize, Serialize};

use crate::core::tts::base::TTSConfig;

// =============================================================================
// Constants
// =============================================================================

/// Default region for the Speech resource.
pub const DEFAULT_REGION: &str = "japaneast";

/// Default synthesis voice (Japanese, female, neural).
pub const DEFAULT_VOICE: &str = "ja-JP-NanamiNeural";

/// Path of the synthesis endpoint relative to the regional host.
pub const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";

/// Path of the voice list endpoint relative to the regional host.
pub const VOICES_LIST_PATH: &str = "/cognitiveservices/voices/list";

/// Default whole-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Regions
// =============================================================================

/// Azure regions that host the Speech service.
///
/// Regions not listed here are carried through as [`AzureRegion::Custom`];
/// the service decides whether they exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AzureRegion {
    EastUs,
    EastUs2,
    WestUs,
    WestUs2,
    WestUs3,
    CentralUs,
    NorthCentralUs,
    SouthCentralUs,
    WestCentralUs,
    CanadaCentral,
    BrazilSouth,
    NorthEurope,
    WestEurope,
    UkSouth,
    FranceCentral,
    GermanyWestCentral,
    SwitzerlandNorth,
    NorwayEast,
    SwedenCentral,
    #[default]
    JapanEast,
    JapanWest,
    KoreaCentral,
    SoutheastAsia,
    EastAsia,
    CentralIndia,
    AustraliaEast,
    SouthAfricaNorth,
    UaeNorth,
    /// Any other region identifier, lowercased
    Custom(String),
}

impl AzureRegion {
    /// Region identifier as used in hostnames.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EastUs => "eastus",
            Self::EastUs2 => "eastus2",
            Self::WestUs => "westus",
            Self::WestUs2 => "westus2",
            Self::WestUs3 => "westus3",
            Self::CentralUs => "centralus",
            Self::NorthCentralUs => "northcentralus",
            Self::SouthCentralUs => "southcentralus",
            Self::WestCentralUs => "westcentralus",
            Self::CanadaCentral => "canadacentral",
            Self::BrazilSouth => "brazilsouth",
            Self::NorthEurope => "northeurope",
            Self::WestEurope => "westeurope",
            Self::UkSouth => "uksouth",
            Self::FranceCentral => "francecentral",
            Self::GermanyWestCentral => "germanywestcentral",
            Self::SwitzerlandNorth => "switzerlandnorth",
            Self::NorwayEast => "norwayeast",
            Self::SwedenCentral => "swedencentral",
            Self::JapanEast => "japaneast",
            Self::JapanWest => "japanwest",
            Self::KoreaCentral => "koreacentral",
            Self::SoutheastAsia => "southeastasia",
            Self::EastAsia => "eastasia",
            Self::CentralIndia => "centralindia",
            Self::AustraliaEast => "australiaeast",
            Self::SouthAfricaNorth => "southafricanorth",
            Self::UaeNorth => "uaenorth",
            Self::Custom(region) => region,
        }
    }

    /// Parse a region identifier. Case and surrounding whitespace are ignored;
    /// an empty string yields the default region.
    pub fn from_str_or_default(s: &str) -> Self {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Self::default(),
            "eastus" => Self::EastUs,
            "eastus2" => Self::EastUs2,
            "westus" => Self::WestUs,
            "westus2" => Self::WestUs2,
            "westus3" => Self::WestUs3,
            "centralus" => Self::CentralUs,
            "northcentralus" => Self::NorthCentralUs,
            "southcentralus" => Self::SouthCentralUs,
            "westcentralus" => Self::WestCentralUs,
            "canadacentral" => Self::CanadaCentral,
            "brazilsouth" => Self::BrazilSouth,
            "northeurope" => Self::NorthEurope,
            "westeurope" => Self::WestEurope,
            "uksouth" => Self::UkSouth,
            "francecentral" => Self::FranceCentral,
            "germanywestcentral" => Self::GermanyWestCentral,
            "switzerlandnorth" => Self::SwitzerlandNorth,
            "norwayeast" => Self::NorwayEast,
            "swedencentral" => Self::SwedenCentral,
            "japaneast" => Self::JapanEast,
            "japanwest" => Self::JapanWest,
            "koreacentral" => Self::KoreaCentral,
            "southeastasia" => Self::SoutheastAsia,
            "eastasia" => Self::EastAsia,
            "centralindia" => Self::CentralIndia,
            "australiaeast" => Self::AustraliaEast,
            "southafricanorth" => Self::SouthAfricaNorth,
            "uaenorth" => Self::UaeNorth,
            _ => Self::Custom(normalized),
        }
    }

    /// Whether the region is one of the known Speech regions.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Whether the identifier is safe to use as the first host label.
    ///
    /// Region names are lowercase ASCII letters and digits only. Anything else
    /// could change which host the request (and the key) is sent to.
    pub fn is_valid_identifier(&self) -> bool {
        let id = self.as_str();
        !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }

    /// Text-to-speech hostname for this region.
    pub fn tts_hostname(&self) -> String {
        format!("{}.tts.speech.microsoft.com", self.as_str())
    }

    /// Full synthesis endpoint URL for this region.
    pub fn tts_rest_url(&self) -> String {
        format!("https://{}{}", self.tts_hostname(), SYNTHESIS_PATH)
    }

    /// Full voice list endpoint URL for this region.
    pub fn voices_list_url(&self) -> String {
        format!("https://{}{}", self.tts_hostname(), VOICES_LIST_PATH)
    }
}

impl From<String> for AzureRegion {
    fn from(s: String) -> Self {
        Self::from_str_or_default(&s)
    }
}

impl From<AzureRegion> for String {
    fn from(region: AzureRegion) -> Self {
        region.as_str().to_string()
    }
}

impl std::fmt::Display for AzureRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Audio output formats, sent in the `X-Microsoft-OutputFormat` header.
///
/// The default is 24 kHz 16-bit mono PCM in a RIFF (WAV) container, which is
/// what the speech SDK writes for file output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AzureAudioEncoding {
    #[serde(rename = "raw-8khz-16bit-mono-pcm")]
    Raw8Khz16BitMonoPcm,
    #[serde(rename = "raw-16khz-16bit-mono-pcm")]
    Raw16Khz16BitMonoPcm,
    #[serde(rename = "raw-24khz-16bit-mono-pcm")]
    Raw24Khz16BitMonoPcm,
    #[serde(rename = "raw-48khz-16bit-mono-pcm")]
    Raw48Khz16BitMonoPcm,
    #[serde(rename = "riff-8khz-16bit-mono-pcm")]
    Riff8Khz16BitMonoPcm,
    #[serde(rename = "riff-16khz-16bit-mono-pcm")]
    Riff16Khz16BitMonoPcm,
    #[default]
    #[serde(rename = "riff-24khz-16bit-mono-pcm")]
    Riff24Khz16BitMonoPcm,
    #[serde(rename = "riff-48khz-16bit-mono-pcm")]
    Riff48Khz16BitMonoPcm,
    #[serde(rename = "audio-24khz-48kbitrate-mono-mp3")]
    Audio24Khz48KBitRateMonoMp3,
    #[serde(rename = "audio-24khz-96kbitrate-mono-mp3")]
    Audio24Khz96KBitRateMonoMp3,
    #[serde(rename = "audio-48khz-192kbitrate-mono-mp3")]
    Audio48Khz192KBitRateMonoMp3,
    #[serde(rename = "ogg-24khz-16bit-mono-opus")]
    Ogg24Khz16BitMonoOpus,
    #[serde(rename = "webm-24khz-16bit-mono-opus")]
    Webm24Khz16BitMonoOpus,
}

impl AzureAudioEncoding {
    /// Header value for this format.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw8Khz16BitMonoPcm => "raw-8khz-16bit-mono-pcm",
            Self::Raw16Khz16BitMonoPcm => "raw-16khz-16bit-mono-pcm",
            Self::Raw24Khz16BitMonoPcm => "raw-24khz-16bit-mono-pcm",
            Self::Raw48Khz16BitMonoPcm => "raw-48khz-16bit-mono-pcm",
            Self::Riff8Khz16BitMonoPcm => "riff-8khz-16bit-mono-pcm",
            Self::Riff16Khz16BitMonoPcm => "riff-16khz-16bit-mono-pcm",
            Self::Riff24Khz16BitMonoPcm => "riff-24khz-16bit-mono-pcm",
            Self::Riff48Khz16BitMonoPcm => "riff-48khz-16bit-mono-pcm",
            Self::Audio24Khz48KBitRateMonoMp3 => "audio-24khz-48kbitrate-mono-mp3",
            Self::Audio24Khz96KBitRateMonoMp3 => "audio-24khz-96kbitrate-mono-mp3",
            Self::Audio48Khz192KBitRateMonoMp3 => "audio-48khz-192kbitrate-mono-mp3",
            Self::Ogg24Khz16BitMonoOpus => "ogg-24khz-16bit-mono-opus",
            Self::Webm24Khz16BitMonoOpus => "webm-24khz-16bit-mono-opus",
        }
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        match self {
            Self::Raw8Khz16BitMonoPcm | Self::Riff8Khz16BitMonoPcm => 8000,
            Self::Raw16Khz16BitMonoPcm | Self::Riff16Khz16BitMonoPcm => 16000,
            Self::Raw48Khz16BitMonoPcm
            | Self::Riff48Khz16BitMonoPcm
            | Self::Audio48Khz192KBitRateMonoMp3 => 48000,
            _ => 24000,
        }
    }

    /// Headerless PCM samples.
    pub fn is_raw_pcm(&self) -> bool {
        matches!(
            self,
            Self::Raw8Khz16BitMonoPcm
                | Self::Raw16Khz16BitMonoPcm
                | Self::Raw24Khz16BitMonoPcm
                | Self::Raw48Khz16BitMonoPcm
        )
    }

    /// PCM in a RIFF/WAVE container.
    pub fn is_riff(&self) -> bool {
        matches!(
            self,
            Self::Riff8Khz16BitMonoPcm
                | Self::Riff16Khz16BitMonoPcm
                | Self::Riff24Khz16BitMonoPcm
                | Self::Riff48Khz16BitMonoPcm
        )
    }

    /// Conventional file extension. Raw PCM is wrapped in WAV on file output.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Audio24Khz48KBitRateMonoMp3
            | Self::Audio24Khz96KBitRateMonoMp3
            | Self::Audio48Khz192KBitRateMonoMp3 => "mp3",
            Self::Ogg24Khz16BitMonoOpus => "ogg",
            Self::Webm24Khz16BitMonoOpus => "webm",
            _ => "wav",
        }
    }

    /// Parse from a header value or a short alias, with fallback to the default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "raw-8khz-16bit-mono-pcm" => Self::Raw8Khz16BitMonoPcm,
            "raw-16khz-16bit-mono-pcm" => Self::Raw16Khz16BitMonoPcm,
            "raw-24khz-16bit-mono-pcm" | "pcm" | "raw" | "linear16" => Self::Raw24Khz16BitMonoPcm,
            "raw-48khz-16bit-mono-pcm" => Self::Raw48Khz16BitMonoPcm,
            "riff-8khz-16bit-mono-pcm" => Self::Riff8Khz16BitMonoPcm,
            "riff-16khz-16bit-mono-pcm" => Self::Riff16Khz16BitMonoPcm,
            "riff-24khz-16bit-mono-pcm" | "wav" | "riff" => Self::Riff24Khz16BitMonoPcm,
            "riff-48khz-16bit-mono-pcm" => Self::Riff48Khz16BitMonoPcm,
            "audio-24khz-48kbitrate-mono-mp3" | "mp3" => Self::Audio24Khz48KBitRateMonoMp3,
            "audio-24khz-96kbitrate-mono-mp3" => Self::Audio24Khz96KBitRateMonoMp3,
            "audio-48khz-192kbitrate-mono-mp3" => Self::Audio48Khz192KBitRateMonoMp3,
            "ogg-24khz-16bit-mono-opus" | "ogg" | "opus" => Self::Ogg24Khz16BitMonoOpus,
            "webm-24khz-16bit-mono-opus" | "webm" => Self::Webm24Khz16BitMonoOpus,
            _ => Self::default(),
        }
    }
}

impl std::fmt::Display for AzureAudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Azure TTS Configuration
// =============================================================================

/// Configuration for the Azure text-to-speech adapter.
///
/// The subscription key lives in `base.api_key`. It is moved out of the
/// config into zeroizing storage when the adapter is built.
///
/// # Example
///
/// ```rust
/// use azure_tts::core::tts::azure::{AzureAudioEncoding, AzureRegion, AzureTTSConfig};
///
/// let mut config = AzureTTSConfig::new("my-key", "westeurope");
/// config.output_format = AzureAudioEncoding::Raw16Khz16BitMonoPcm;
/// assert_eq!(config.region, AzureRegion::WestEurope);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureTTSConfig {
    /// Base TTS configuration
    #[serde(flatten)]
    pub base: TTSConfig,

    /// Region of the Speech resource; the key is tied to it.
    #[serde(default)]
    pub region: AzureRegion,

    /// Output format requested from the service.
    #[serde(default)]
    pub output_format: AzureAudioEncoding,

    /// Base URL overriding the regional host (e.g. a Speech container).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for AzureTTSConfig {
    fn default() -> Self {
        Self {
            base: TTSConfig {
                provider: "azure".to_string(),
                api_key: String::new(),
                voice_id: Some(DEFAULT_VOICE.to_string()),
                audio_format: Some(AzureAudioEncoding::default().as_str().to_string()),
                sample_rate: Some(AzureAudioEncoding::default().sample_rate()),
                connection_timeout: Some(DEFAULT_CONNECT_TIMEOUT_SECS),
                request_timeout: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            region: AzureRegion::default(),
            output_format: AzureAudioEncoding::default(),
            endpoint: None,
        }
    }
}

impl AzureTTSConfig {
    /// Configuration for a key and region, everything else defaulted.
    pub fn new(subscription_key: impl Into<String>, region: &str) -> Self {
        let mut config = Self::default();
        config.base.api_key = subscription_key.into();
        config.region = AzureRegion::from_str_or_default(region);
        config
    }

    /// Build from a base config, reading voice and format from it.
    pub fn from_base(base: TTSConfig, region: &str) -> Self {
        let output_format = base
            .audio_format
            .as_deref()
            .map(AzureAudioEncoding::from_str_or_default)
            .unwrap_or_default();
        Self {
            base,
            region: AzureRegion::from_str_or_default(region),
            output_format,
            endpoint: None,
        }
    }

    /// Set the output format, keeping `base` in sync.
    pub fn set_output_format(&mut self, format: AzureAudioEncoding) {
        self.output_format = format;
        self.base.audio_format = Some(format.as_str().to_string());
        self.base.sample_rate = Some(format.sample_rate());
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.api_key.trim().is_empty() {
            return Err("Subscription key is required".to_string());
        }

        if self.region.as_str().trim().is_empty() {
            return Err("Region is required".to_string());
        }

        if !self.region.is_valid_identifier() {
            return Err(format!(
                "Invalid region '{}': only lowercase letters and digits are allowed",
                self.region
            ));
        }

        if let Some(ref voice) = self.base.voice_id
            && voice.trim().is_empty()
        {
            return Err("Voice name must not be empty".to_string());
        }

        Ok(())
    }

    /// Voice used when a request does not name one.
    pub fn default_voice(&self) -> &str {
        self.base.voice_id.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    /// URL of the synthesis endpoint.
    pub fn synthesis_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => format!("{}{}", endpoint.trim_end_matches('/'), SYNTHESIS_PATH),
            None => self.region.tts_rest_url(),
        }
    }

    /// URL of the voice list endpoint.
    pub fn voices_list_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => {
                format!("{}{}", endpoint.trim_end_matches('/'), VOICES_LIST_PATH)
            }
            None => self.region.voices_list_url(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
