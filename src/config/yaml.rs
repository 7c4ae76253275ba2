use serde::Deserialize;
use std::path::Path;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present
/// here override the matching environment variables.
///
/// # Example YAML structure
/// ```yaml
/// azure:
///   subscription_key: "your-subscription-key"
///   region: "japaneast"
///   voice: "ja-JP-NanamiNeural"
///   output_format: "riff-24khz-16bit-mono-pcm"
///   endpoint: "https://japaneast.tts.speech.microsoft.com"
///   timeout_seconds: 60
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub azure: Option<AzureYaml>,
}

/// Azure Speech configuration from YAML
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct AzureYaml {
    pub subscription_key: Option<String>,
    pub region: Option<String>,
    pub voice: Option<String>,
    pub output_format: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for AzureYaml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureYaml")
            .field(
                "subscription_key",
                &self.subscription_key.as_deref().map(crate::core::tts::redact),
            )
            .field("region", &self.region)
            .field("voice", &self.voice)
            .field("output_format", &self.output_format)
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text. An empty document is an empty config.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
