//! transogg - Main entry point
//!
//! Thin terminal adapter around the conversion pipeline: the input file
//! and settings come from command-line arguments, status updates go to
//! the log, and the finished artifact is written next to the input (or
//! to an explicit output path).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transogg::pipeline::Converter;
use transogg::ui::{ConvertRequest, OutputArtifact, SelectedFile, Status, UiPort};

/// Command-line arguments for transogg
#[derive(Parser, Debug)]
#[command(name = "transogg")]
#[command(about = "Convert an audio file to Ogg Vorbis")]
#[command(version)]
struct Args {
    /// Input audio file
    input: PathBuf,

    /// Target sample rate in Hz (clamped to 8000-48000, default 44100)
    #[arg(short = 'r', long)]
    sample_rate: Option<u32>,

    /// Downmix to mono
    #[arg(short, long)]
    mono: bool,

    /// Vorbis VBR quality, -1 to 10 (default 3)
    #[arg(short, long)]
    quality: Option<f32>,

    /// Output path (defaults to the input file name with an .ogg extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// UI port backed by the terminal: status to the log, artifact to disk.
struct TerminalPort {
    request: Option<ConvertRequest>,
    output_path: Option<PathBuf>,
}

impl UiPort for TerminalPort {
    fn request(&mut self) -> ConvertRequest {
        self.request.take().unwrap_or_default()
    }

    fn set_status(&mut self, status: Status) {
        info!("{}", status);
    }

    fn publish(&mut self, artifact: OutputArtifact) -> transogg::Result<()> {
        let path = self
            .output_path
            .take()
            .unwrap_or_else(|| PathBuf::from(&artifact.file_name));

        std::fs::write(&path, &artifact.bytes)?;
        info!(
            "Wrote {} bytes ({}) to {}",
            artifact.bytes.len(),
            artifact.mime_type,
            path.display()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transogg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Input path has no file name")?;

    let request = ConvertRequest {
        file: Some(SelectedFile { name, data }),
        target_rate: args.sample_rate,
        mono: args.mono,
        quality: args.quality,
    };

    let ui = TerminalPort {
        request: Some(request),
        output_path: args.output,
    };

    let mut converter = Converter::new(ui);
    converter.run().await.context("Conversion failed")?;

    Ok(())
}
