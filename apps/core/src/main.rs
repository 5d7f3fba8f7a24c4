// MindReader command-line entry point
// Runs one analysis against the configured backend and prints the result as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mindreader_core::analysis::verify_key;
use mindreader_core::telemetry::{init_tracing, LogFormat};
use mindreader_core::{ErrorResult, MindReader, MindReaderConfig, Style};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mindreader", version, about = "Emotion and deception analysis over a multimodal model")]
struct Cli {
    /// Tone of the generated text: calm, friendly, professional or motivational.
    #[arg(long, global = true, default_value = "calm", env = "MINDREADER_STYLE")]
    style: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a piece of text for emotion and deception signals.
    Text { text: String },
    /// Mood-based suggestions for a piece of text.
    Suggest { text: String },
    /// Text analysis followed by suggestions.
    Scan { text: String },
    /// Analyze facial micro-expressions in an image file.
    Image { path: PathBuf },
    /// Analyze voice stress in an audio file.
    Audio { path: PathBuf },
    /// Check that the API key is accepted by the service.
    VerifyKey,
}

fn render<T: Serialize>(result: Result<T, ErrorResult>) -> anyhow::Result<(String, bool)> {
    Ok(match result {
        Ok(value) => (serde_json::to_string_pretty(&value)?, true),
        Err(failure) => (serde_json::to_string_pretty(&failure)?, false),
    })
}

async fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn connect(config: &MindReaderConfig) -> anyhow::Result<MindReader> {
    MindReader::connect(config).await.context("Failed to initialize MindReader")
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing(LogFormat::from_env());
    let cli = Cli::parse();
    let style = Style::parse(&cli.style);

    let config = MindReaderConfig::load().context("MindReader is not configured")?;

    let (output, ok) = match cli.command {
        Command::VerifyKey => {
            info!(key = %config.masked_key(), "Key found");
            let reply = verify_key(&config).await.context("API verification failed")?;
            println!("API call successful: {}", reply);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Text { text } => render(connect(&config).await?.analyze_text(&text, style).await)?,
        Command::Suggest { text } => render(connect(&config).await?.get_suggestions(&text, style).await)?,
        Command::Scan { text } => render(connect(&config).await?.scan_text(&text, style).await)?,
        Command::Image { path } => {
            let image = read_file(&path).await?;
            render(connect(&config).await?.analyze_image(image, style).await)?
        }
        Command::Audio { path } => {
            let audio = read_file(&path).await?;
            render(connect(&config).await?.analyze_audio(audio, style).await)?
        }
    };

    println!("{}", output);
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
