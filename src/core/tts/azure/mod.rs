//! Azure AI Speech text-to-speech.
//!
//! Synthesizes speech through the Speech service REST API and routes the
//! audio either to the default speaker or to a file.
//!
//! # Configuration
//!
//! ```bash
//! export AZURE_SPEECH_KEY="your-subscription-key"
//! export AZURE_SPEECH_REGION="japaneast"  # Optional, defaults to japaneast
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use azure_tts::core::tts::azure::{AzureTTS, SynthesisOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tts = AzureTTS::new(std::env::var("AZURE_SPEECH_KEY")?, "japaneast")?;
//!
//!     // Default speaker, default voice
//!     tts.text_to_speech("こんにちは。", SynthesisOptions::new()).await?;
//!
//!     // Male voice with prosody, written to a WAV file
//!     let options = SynthesisOptions::new()
//!         .with_voice("ja-JP-KeitaNeural")
//!         .with_rate("1.5")
//!         .with_pitch("+50Hz")
//!         .with_volume("loud")
//!         .with_output_file("output.wav");
//!     tts.text_to_speech("こんにちは。", options).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Audio Format Details
//!
//! | Format | Extension | Description |
//! |--------|-----------|-------------|
//! | riff-*-16bit-mono-pcm | .wav | PCM in WAV container (default, 24 kHz) |
//! | raw-*-16bit-mono-pcm | .wav | Headerless PCM, wrapped in WAV on file output |
//! | audio-*-mono-mp3 | .mp3 | MPEG Layer-3 |
//! | ogg-24khz-16bit-mono-opus | .ogg | Opus in OGG |
//! | webm-24khz-16bit-mono-opus | .webm | Opus in WebM |

pub mod config;
mod provider;
pub mod ssml;
pub mod voices;


pub use config::{
    AzureAudioEncoding, AzureRegion, AzureTTSConfig, DEFAULT_REGION, DEFAULT_VOICE,
};
pub use provider::{AZURE_TTS_URL, AzureTTS, SynthesisOptions, SynthesisOutcome};
pub use ssml::{Prosody, build_ssml};
pub use voices::{Voice, voices_for_locale};
