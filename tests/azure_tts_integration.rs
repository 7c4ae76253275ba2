//! Integration tests for the Azure TTS adapter
//!
//! These tests run the adapter against a local mock of the Speech REST API
//! and verify:
//! - Construction does not touch the network
//! - Requests carry the subscription key, SSML body and output format
//! - Audio is routed to the speaker sink or to a file
//! - HTTP errors are classified
//! - The voice list is fetched and filtered

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use azure_tts::core::audio::{AudioOutputConfig, AudioSink};
use azure_tts::core::tts::azure::{AzureAudioEncoding, AzureTTS, AzureTTSConfig, SynthesisOptions};
use azure_tts::core::tts::{AudioData, TTSError, TTSResult};

const SAMPLE_TEXT: &str = "こんにちは。Azure Text-to-Speechのテストです。";

/// Speaker stand-in that records what it was asked to play
#[derive(Default)]
struct RecordingSink {
    played: Mutex<Vec<AudioData>>,
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn write(&self, audio: &AudioData) -> TTSResult<()> {
        self.played.lock().unwrap().push(audio.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn fake_riff() -> Vec<u8> {
    let mut bytes = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

fn config_for(server: &MockServer) -> AzureTTSConfig {
    let mut config = AzureTTSConfig::new("test-key", "japaneast");
    config.endpoint = Some(server.uri());
    config
}

fn tts_for(server: &MockServer) -> (AzureTTS, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let tts = AzureTTS::from_config(config_for(server))
        .unwrap()
        .with_speaker_sink(sink.clone());
    (tts, sink)
}

async fn mount_synthesis(server: &MockServer, body: Vec<u8>) {
    Mock::given(method("POST"))
        .and(path("/cognitiveservices/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Building the adapter must not issue any request
#[tokio::test]
async fn test_construction_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tts = AzureTTS::from_config(config_for(&server)).unwrap();
    assert_eq!(tts.get_provider_info()["provider"], "azure");

    server.verify().await;
}

/// Without an output path the audio goes to the speaker
#[tokio::test]
async fn test_no_output_routes_to_speaker() {
    let server = MockServer::start().await;
    let audio = fake_riff();
    mount_synthesis(&server, audio.clone()).await;
    let (tts, sink) = tts_for(&server);

    let outcome = tts
        .text_to_speech(SAMPLE_TEXT, SynthesisOptions::new())
        .await
        .unwrap();

    assert_eq!(outcome.output, AudioOutputConfig::DefaultSpeaker);
    assert_eq!(outcome.voice, "ja-JP-NanamiNeural");
    assert_eq!(outcome.audio_bytes, audio.len());

    let played = sink.played.lock().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].data, audio);
    assert_eq!(played[0].format, "riff-24khz-16bit-mono-pcm");
}

/// With an output path the audio lands in a file and nothing is played
#[tokio::test]
async fn test_output_path_creates_file() {
    let server = MockServer::start().await;
    let audio = fake_riff();
    mount_synthesis(&server, audio.clone()).await;
    let (tts, sink) = tts_for(&server);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("nested").join("output.wav");

    let outcome = tts
        .text_to_speech(
            SAMPLE_TEXT,
            SynthesisOptions::new().with_output_file(&output),
        )
        .await
        .unwrap();

    assert_eq!(outcome.output.file_path(), Some(output.as_path()));
    assert_eq!(std::fs::read(&output).unwrap(), audio);
    assert!(sink.played.lock().unwrap().is_empty());
}

/// The request carries key, content type, output format and the SSML body
#[tokio::test]
async fn test_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cognitiveservices/v1"))
        .and(header("Ocp-Apim-Subscription-Key", "test-key"))
        .and(header("Content-Type", "application/ssml+xml"))
        .and(header("X-Microsoft-OutputFormat", "riff-24khz-16bit-mono-pcm"))
        .and(body_string_contains("<voice name=\"ja-JP-KeitaNeural\">"))
        .and(body_string_contains(
            "<prosody rate=\"1.5\" pitch=\"+50Hz\" volume=\"loud\">",
        ))
        .and(body_string_contains("xml:lang=\"ja-JP\""))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(fake_riff()))
        .expect(1)
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    let options = SynthesisOptions::new()
        .with_voice("ja-JP-KeitaNeural")
        .with_rate("1.5")
        .with_pitch("+50Hz")
        .with_volume("loud");
    tts.text_to_speech(SAMPLE_TEXT, options).await.unwrap();

    server.verify().await;
}

/// Text is escaped before it is placed in the SSML body
#[tokio::test]
async fn test_text_is_escaped_in_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("Tom &amp; Jerry &lt;3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(fake_riff()))
        .expect(1)
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    tts.text_to_speech("Tom & Jerry <3", SynthesisOptions::new())
        .await
        .unwrap();

    server.verify().await;
}

/// Raw PCM is wrapped in a WAV header when written to a file
#[tokio::test]
async fn test_raw_pcm_written_as_wav() {
    let server = MockServer::start().await;
    let pcm: Vec<u8> = (0..1600i16).flat_map(|s| s.to_le_bytes()).collect();
    Mock::given(method("POST"))
        .and(header("X-Microsoft-OutputFormat", "raw-16khz-16bit-mono-pcm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pcm.clone()))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.set_output_format(AzureAudioEncoding::Raw16Khz16BitMonoPcm);
    let tts = AzureTTS::from_config(config).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("raw.wav");
    tts.text_to_speech(SAMPLE_TEXT, SynthesisOptions::new().with_output_file(&output))
        .await
        .unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 1600);
}

#[tokio::test]
async fn test_empty_text_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    let result = tts.text_to_speech("   ", SynthesisOptions::new()).await;
    assert!(matches!(result, Err(TTSError::InvalidConfiguration(_))));

    server.verify().await;
}

#[tokio::test]
async fn test_http_errors_are_classified() {
    let cases: [(u16, fn(&TTSError) -> bool); 5] = [
        (400, |e| matches!(e, TTSError::InvalidConfiguration(_))),
        (401, |e| matches!(e, TTSError::AuthenticationFailed(_))),
        (403, |e| matches!(e, TTSError::AuthenticationFailed(_))),
        (429, |e| matches!(e, TTSError::RateLimited(_))),
        (503, |e| matches!(e, TTSError::ProviderError(_))),
    ];

    for (status, check) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("error detail"))
            .mount(&server)
            .await;
        let (tts, sink) = tts_for(&server);

        let err = tts
            .text_to_speech(SAMPLE_TEXT, SynthesisOptions::new())
            .await
            .unwrap_err();
        assert!(check(&err), "status {status} gave {err:?}");
        assert!(err.to_string().contains("error detail"));
        assert!(sink.played.lock().unwrap().is_empty());
    }
}

/// A failed request leaves no output file behind
#[tokio::test]
async fn test_failed_request_writes_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.wav");
    let result = tts
        .text_to_speech(SAMPLE_TEXT, SynthesisOptions::new().with_output_file(&output))
        .await;

    assert!(matches!(result, Err(TTSError::AuthenticationFailed(_))));
    assert!(!Path::new(&output).exists());
}

#[tokio::test]
async fn test_empty_audio_is_an_error() {
    let server = MockServer::start().await;
    mount_synthesis(&server, Vec::new()).await;
    let (tts, _sink) = tts_for(&server);

    let result = tts.text_to_speech(SAMPLE_TEXT, SynthesisOptions::new()).await;
    assert!(matches!(result, Err(TTSError::AudioGenerationFailed(_))));
}

#[tokio::test]
async fn test_list_voices_and_filter() {
    let server = MockServer::start().await;
    let voices = serde_json::json!([
        {
            "Name": "Microsoft Server Speech Text to Speech Voice (ja-JP, NanamiNeural)",
            "DisplayName": "Nanami",
            "LocalName": "七海",
            "ShortName": "ja-JP-NanamiNeural",
            "Gender": "Female",
            "Locale": "ja-JP",
            "VoiceType": "Neural",
            "SampleRateHertz": "48000",
            "StyleList": ["chat", "cheerful"]
        },
        {
            "Name": "Microsoft Server Speech Text to Speech Voice (ja-JP, KeitaNeural)",
            "DisplayName": "Keita",
            "LocalName": "圭太",
            "ShortName": "ja-JP-KeitaNeural",
            "Gender": "Male",
            "Locale": "ja-JP",
            "VoiceType": "Neural",
            "SampleRateHertz": "48000"
        },
        {
            "Name": "Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)",
            "DisplayName": "Jenny",
            "LocalName": "Jenny",
            "ShortName": "en-US-JennyNeural",
            "Gender": "Female",
            "Locale": "en-US",
            "VoiceType": "Neural",
            "SampleRateHertz": "48000"
        }
    ]);
    Mock::given(method("GET"))
        .and(path("/cognitiveservices/voices/list"))
        .and(header("Ocp-Apim-Subscription-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(voices))
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    let all = tts.list_voices().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].local_name, "七海");
    assert_eq!(all[0].style_list, vec!["chat", "cheerful"]);

    let japanese = tts.voices_for_locale("ja-JP").await.unwrap();
    let names: Vec<_> = japanese.iter().map(|v| v.short_name.as_str()).collect();
    assert_eq!(names, vec!["ja-JP-NanamiNeural", "ja-JP-KeitaNeural"]);

    let english = tts.voices_for_locale("en").await.unwrap();
    assert_eq!(english.len(), 1);
}

#[tokio::test]
async fn test_list_voices_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (tts, _sink) = tts_for(&server);

    assert!(matches!(
        tts.list_voices().await,
        Err(TTSError::AuthenticationFailed(_))
    ));
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let mut config = AzureTTSConfig::new("test-key", "japaneast");
    config.endpoint = Some("http://speech.example.com".to_string());
    assert!(matches!(
        AzureTTS::from_config(config),
        Err(TTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_missing_key_is_rejected() {
    assert!(matches!(
        AzureTTS::new("", "japaneast"),
        Err(TTSError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        AzureTTS::new("test-key", "  "),
        Err(TTSError::InvalidConfiguration(_))
    ));
}

/// A region that is not a bare identifier cannot steer the request elsewhere
#[test]
fn test_region_cannot_change_host() {
    for region in ["attacker.example#", "attacker.example/", "attacker.example", "japan east"] {
        let result = AzureTTS::new("secret-key", region);
        assert!(
            matches!(result, Err(TTSError::InvalidConfiguration(ref msg)) if msg.contains("Invalid region")),
            "{region:?} was accepted"
        );
    }

    let tts = AzureTTS::new("secret-key", "qatarcentral").unwrap();
    let url = url::Url::parse(&tts.azure_config().synthesis_url()).unwrap();
    assert_eq!(url.host_str(), Some("qatarcentral.tts.speech.microsoft.com"));
}
