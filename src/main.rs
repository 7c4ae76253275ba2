use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use azure_tts::{
    AzureAudioEncoding, AzureTTS, ServiceConfig, SynthesisOptions, SynthesisOutcome,
    core::AudioOutputConfig,
};

/// Sample sentence spoken by the demo sequence
const SAMPLE_TEXT: &str = "こんにちは。Azure Text-to-Speechのテストです。";

/// Azure Speech text-to-speech client
#[derive(Parser, Debug)]
#[command(name = "azure-tts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run; without one the sample sequence is played
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize text to the speaker or to a file
    Speak {
        /// Text to synthesize
        text: String,

        /// Voice name (e.g. ja-JP-KeitaNeural)
        #[arg(long)]
        voice: Option<String>,

        /// Write audio to this file instead of playing it
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Speaking rate (e.g. slow, 1.5)
        #[arg(long)]
        rate: Option<String>,

        /// Pitch (e.g. high, +50Hz)
        #[arg(long)]
        pitch: Option<String>,

        /// Volume (e.g. loud, 50%)
        #[arg(long)]
        volume: Option<String>,

        /// Output format (e.g. riff-24khz-16bit-mono-pcm, mp3)
        #[arg(short = 'f', long = "format")]
        format: Option<String>,
    },

    /// List the voices available in the configured region
    Voices {
        /// Only show voices for this locale or language (e.g. ja-JP, en)
        #[arg(short = 'l', long = "locale")]
        locale: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = if let Some(config_path) = cli.config {
        info!(path = %config_path.display(), "Loading configuration");
        ServiceConfig::from_file(&config_path)?
    } else {
        ServiceConfig::from_env()?
    };

    match cli.command {
        None => run_sample(&config).await,
        Some(Commands::Speak {
            text,
            voice,
            output,
            rate,
            pitch,
            volume,
            format,
        }) => {
            let mut azure_config = config.to_azure_config();
            if let Some(format) = format {
                azure_config.set_output_format(AzureAudioEncoding::from_str_or_default(&format));
            }
            let tts = AzureTTS::from_config(azure_config)?;

            let mut options = SynthesisOptions::new().with_output(AudioOutputConfig::from_path(output));
            if let Some(voice) = voice {
                options = options.with_voice(voice);
            }
            if let Some(rate) = rate {
                options = options.with_rate(rate);
            }
            if let Some(pitch) = pitch {
                options = options.with_pitch(pitch);
            }
            if let Some(volume) = volume {
                options = options.with_volume(volume);
            }

            let outcome = tts.text_to_speech(&text, options).await?;
            report(&outcome);
            Ok(())
        }
        Some(Commands::Voices { locale }) => {
            let tts = AzureTTS::from_config(config.to_azure_config())?;
            let voices = match locale {
                Some(ref locale) => tts.voices_for_locale(locale).await?,
                None => tts.list_voices().await?,
            };

            for voice in &voices {
                println!(
                    "{:<40} {:<8} {:<7} {}",
                    voice.short_name, voice.locale, voice.gender, voice.local_name
                );
            }
            println!("{} voices", voices.len());
            Ok(())
        }
    }
}

/// Speak the sample with the default voice, again with a male voice, and
/// finally with prosody settings into `output.wav`.
async fn run_sample(config: &ServiceConfig) -> anyhow::Result<()> {
    let tts = AzureTTS::from_config(config.to_azure_config())?;

    let outcome = tts
        .text_to_speech(SAMPLE_TEXT, SynthesisOptions::new())
        .await
        .context("Default voice playback failed")?;
    report(&outcome);

    println!("Playing with a male voice...");
    let outcome = tts
        .text_to_speech(
            SAMPLE_TEXT,
            SynthesisOptions::new().with_voice("ja-JP-KeitaNeural"),
        )
        .await
        .context("Male voice playback failed")?;
    report(&outcome);

    println!("Combining rate, pitch and volume...");
    let outcome = tts
        .text_to_speech(
            SAMPLE_TEXT,
            SynthesisOptions::new()
                .with_rate("1.5")
                .with_pitch("+50Hz")
                .with_volume("loud")
                .with_output_file("output.wav"),
        )
        .await
        .context("Prosody synthesis failed")?;
    report(&outcome);

    Ok(())
}

fn report(outcome: &SynthesisOutcome) {
    match outcome.output.file_path() {
        Some(path) => println!("Audio file saved: {}", path.display()),
        None => println!("Playback finished ({})", outcome.voice),
    }
}
