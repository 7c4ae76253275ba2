//! Configuration module for the Azure TTS client
//!
//! Configuration comes from three sources: `.env` files, environment
//! variables, and an optional YAML file. Priority: YAML > ENV vars > .env
//! values > defaults. The `.env` file is loaded by the binary at startup, so
//! by the time this module runs its values are ordinary environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `AZURE_SPEECH_KEY` | required |
//! | `AZURE_SPEECH_REGION` | `japaneast` |
//! | `AZURE_SPEECH_VOICE` | `ja-JP-NanamiNeural` |
//! | `AZURE_SPEECH_OUTPUT_FORMAT` | `riff-24khz-16bit-mono-pcm` |
//! | `AZURE_SPEECH_ENDPOINT` | regional host |
//! | `AZURE_SPEECH_TIMEOUT_SECONDS` | `60` |
//!
//! # Example
//! ```rust,no_run
//! use azure_tts::config::ServiceConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env()?;
//! println!("Using region {}", config.region);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::core::tts::azure::config::DEFAULT_REGION;
use crate::core::tts::{AzureAudioEncoding, AzureTTSConfig, redact};
use crate::utils::{UrlValidationError, validate_endpoint_url};

mod yaml;

pub use yaml::{AzureYaml, YamlConfig};

pub const ENV_SUBSCRIPTION_KEY: &str = "AZURE_SPEECH_KEY";
pub const ENV_REGION: &str = "AZURE_SPEECH_REGION";
pub const ENV_VOICE: &str = "AZURE_SPEECH_VOICE";
pub const ENV_OUTPUT_FORMAT: &str = "AZURE_SPEECH_OUTPUT_FORMAT";
pub const ENV_ENDPOINT: &str = "AZURE_SPEECH_ENDPOINT";
pub const ENV_TIMEOUT_SECONDS: &str = "AZURE_SPEECH_TIMEOUT_SECONDS";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AZURE_SPEECH_KEY environment variable must be set")]
    MissingSubscriptionKey,

    #[error("Invalid value for {name}: '{value}' (expected a positive integer)")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] UrlValidationError),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub subscription_key: String,
    pub region: String,
    pub voice: Option<String>,
    pub output_format: Option<String>,
    pub endpoint: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("subscription_key", &redact(&self.subscription_key))
            .field("region", &self.region)
            .field("voice", &self.voice)
            .field("output_format", &self.output_format)
            .field("endpoint", &self.endpoint)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `AZURE_SPEECH_KEY` is missing or any value has an
    /// invalid format.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(env_lookup, None)
    }

    /// Load configuration from a YAML file with environment variables as the base
    ///
    /// YAML values override environment variables.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        Self::from_sources(env_lookup, Some(yaml_config))
    }

    /// Merge a variable lookup with optional YAML overrides and validate the result.
    fn from_sources<F>(lookup: F, yaml: Option<YamlConfig>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let azure = yaml.and_then(|y| y.azure).unwrap_or_default();
        let env = |name: &str| non_blank(lookup(name));

        let subscription_key = non_blank(azure.subscription_key)
            .or_else(|| env(ENV_SUBSCRIPTION_KEY))
            .ok_or(ConfigError::MissingSubscriptionKey)?;

        let region = non_blank(azure.region)
            .or_else(|| env(ENV_REGION))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let voice = non_blank(azure.voice).or_else(|| env(ENV_VOICE));
        let output_format = non_blank(azure.output_format).or_else(|| env(ENV_OUTPUT_FORMAT));
        let endpoint = non_blank(azure.endpoint).or_else(|| env(ENV_ENDPOINT));

        let request_timeout_seconds = match azure.timeout_seconds {
            Some(secs) => Some(secs),
            None => env(ENV_TIMEOUT_SECONDS)
                .map(|v| parse_seconds(ENV_TIMEOUT_SECONDS, &v))
                .transpose()?,
        };

        let config = Self {
            subscription_key: subscription_key.trim().to_string(),
            region: region.trim().to_string(),
            voice,
            output_format,
            endpoint,
            request_timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref endpoint) = self.endpoint {
            validate_endpoint_url(endpoint)?;
        }

        if self.request_timeout_seconds == Some(0) {
            return Err(ConfigError::InvalidNumber {
                name: ENV_TIMEOUT_SECONDS,
                value: "0".to_string(),
            });
        }

        if let Some(ref format) = self.output_format
            && AzureAudioEncoding::from_str_or_default(format).as_str() != format.trim()
        {
            warn!(
                output_format = %format,
                fallback = %AzureAudioEncoding::from_str_or_default(format),
                "Output format is not an exact service format name, using fallback"
            );
        }

        Ok(())
    }

    /// Adapter configuration for these settings.
    pub fn to_azure_config(&self) -> AzureTTSConfig {
        let mut config = AzureTTSConfig::new(self.subscription_key.clone(), &self.region);
        config.base.voice_id = self.voice.clone();
        if let Some(ref format) = self.output_format {
            config.set_output_format(AzureAudioEncoding::from_str_or_default(format));
        }
        config.endpoint = self.endpoint.clone();
        config.base.request_timeout = self.request_timeout_seconds;
        config
    }
}

/// Blank values count as unset, whichever source they come from.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_seconds(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
