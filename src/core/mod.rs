pub mod audio;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{AudioOutputConfig, AudioSink, FileSink, SpeakerSink};

pub use tts::{
    AudioData, AzureAudioEncoding, AzureRegion, AzureTTS, AzureTTSConfig, Prosody,
    SynthesisOptions, SynthesisOutcome, TTSConfig, TTSError, TTSResult, Voice,
};
