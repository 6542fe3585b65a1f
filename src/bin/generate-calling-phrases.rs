//! Batch-generate the calling phrase set through FineVoice.
//!
//! Same shape as the soundboard generator, but the phrases are mostly
//! Hebrew and each entry pins its language tag explicitly instead of
//! relying on character-set inference. Filename slugs must stay unique;
//! the phrase itself is the lookup key downstream.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use voice_relay::config::ServerConfig;
use voice_relay::core::tts::FineVoiceTts;

/// Calling phrases: (phrase, filename, language tag)
const PHRASES: &[(&str, &str, &str)] = &[
    ("רגע אחד", "calling-rega-echad.mp3", "he-IL"),
    ("שנייה בבקשה", "calling-shniya-bevakasha.mp3", "he-IL"),
    ("אני בודק", "calling-ani-bodek.mp3", "he-IL"),
    ("hi", "calling-hi.mp3", "en-US"),
    ("לא הבנתי", "calling-lo-havanti.mp3", "he-IL"),
    ("אתה יכול לחזור על זה?", "calling-ata-yachol-lachazor.mp3", "he-IL"),
    ("כן", "calling-ken.mp3", "he-IL"),
    ("בסדר", "calling-beseder.mp3", "he-IL"),
    ("אוקיי", "calling-okai.mp3", "he-IL"),
    ("כן, אני מקשיב", "calling-ken-ani-makshiv.mp3", "he-IL"),
    ("תודה על הסבלנות", "calling-toda-al-hasavlanut.mp3", "he-IL"),
];

/// Pause between items to stay clear of provider rate limits
const ITEM_PAUSE: Duration = Duration::from_secs(1);

/// Generate calling-phrase audio files through FineVoice
#[derive(Parser, Debug)]
#[command(name = "generate-calling-phrases")]
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
        "starting calling phrases audio generation"
    );

    let mut generated = 0u32;
    let mut failed = 0u32;

    for &(phrase, filename, lang) in PHRASES {
        match generate(&tts, phrase, filename, lang, &cli.out_dir).await {
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
    lang: &str,
    out_dir: &Path,
) -> Result<usize> {
    info!(phrase, filename, lang, "generating audio");
    let audio = tts.synthesize_with_language(phrase.trim(), Some(lang)).await?;
    let path = out_dir.join(filename);
    tokio::fs::write(&path, &audio)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(audio.len())
}
