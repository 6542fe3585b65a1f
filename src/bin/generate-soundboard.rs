//! Batch-generate the soundboard phrase set through FineVoice.
//!
//! One audio file is written per phrase; a failing item is logged and
//! skipped so a single bad generation never aborts the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use voice_relay::config::ServerConfig;
use voice_relay::core::tts::{FineVoiceTts, SpeechProvider};

/// Soundboard phrases
const PHRASES: &[(&str, &str)] = &[
    ("Hi how are you?", "hi-how-are-you.mp3"),
    ("Good morning!", "good-morning.mp3"),
    ("Please come here", "please-come-here.mp3"),
    ("I need help", "i-need-help.mp3"),
    ("Please", "please.mp3"),
    ("I love you", "i-love-you.mp3"),
    ("I'm hungry", "im-hungry.mp3"),
    ("I'm thirsty", "im-thirsty.mp3"),
    ("I'm tired", "im-tired.mp3"),
    ("I'm cold", "im-cold.mp3"),
];

/// Pause between items to stay clear of provider rate limits
const ITEM_PAUSE: Duration = Duration::from_secs(1);

/// Generate soundboard audio files through FineVoice
#[derive(Parser, Debug)]
#[command(name = "generate-soundboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory the audio files are written to
    #[arg(long, default_value = "public")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;
    let tts = FineVoiceTts::from_server_config(&config, reqwest::Client::new())
        .context("set FINEVOICE_API_KEY before running the generator")?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    info!(
        voice = tts.voice_model(),
        out_dir = %cli.out_dir.display(),
        "starting soundboard audio generation"
    );

    let mut generated = 0u32;
    let mut failed = 0u32;

    for &(phrase, filename) in PHRASES {
        match generate(&tts, phrase, filename, &cli.out_dir).await {
            Ok(bytes) => {
                info!(filename, kib = %format_args!("{:.2}", bytes as f64 / 1024.0), "saved");
                generated += 1;
            }
            Err(e) => {
                error!(phrase, error = %e, "generation failed");
                failed += 1;
            }
        }
        tokio::time::sleep(ITEM_PAUSE).await;
    }

    info!(generated, failed, "generation complete");
    Ok(())
}

async fn generate(
    tts: &FineVoiceTts,
    phrase: &str,
    filename: &str,
    out_dir: &Path,
) -> Result<usize> {
    info!(phrase, filename, "generating audio");
    let audio = tts.synthesize(phrase.trim()).await?;
    let path = out_dir.join(filename);
    tokio::fs::write(&path, &audio)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(audio.len())
}
