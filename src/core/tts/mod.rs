pub mod azure;
mod base;

pub use azure::{
    AZURE_TTS_URL, AzureAudioEncoding, AzureRegion, AzureTTS, AzureTTSConfig, Prosody,
    SynthesisOptions, SynthesisOutcome, Voice,
};
pub use base::{AudioData, TTSConfig, TTSError, TTSResult};
pub(crate) use base::redact;
