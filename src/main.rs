use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voice_memos::config::WaveformConfig;
use voice_memos::{
    AudioFile, AudioSlots, Config, FileCaptureBackend, FilePlaybackBackend, MemoDeck, NormalizedWaveform,
    PlaybackState,
};

#[derive(Parser)]
#[command(name = "voice-memos", about = "Record voice memos and play them back")]
struct Cli {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/voice-memos")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a memo from a WAV file and show its waveform
    Record {
        input: PathBuf,
        /// Stop after this many seconds (default: whole file)
        #[arg(long)]
        seconds: Option<f64>,
        /// Print the memo as JSON instead of bars
        #[arg(long)]
        json: bool,
    },
    /// Record a memo, then play it back to the end
    Demo {
        input: PathBuf,
        #[arg(long)]
        seconds: Option<f64>,
    },
}

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn render_bars(waveform: &NormalizedWaveform, config: &WaveformConfig) -> String {
    let span = (config.bar_max_height - config.bar_min_height).max(f32::EPSILON);
    waveform
        .bar_heights(config)
        .into_iter()
        .map(|h| {
            let t = ((h - config.bar_min_height) / span).clamp(0.0, 1.0);
            BLOCKS[(t * (BLOCKS.len() - 1) as f32).round() as usize]
        })
        .collect()
}

fn render_progress(fraction: f32, width: usize) -> String {
    let filled = ((fraction * width as f32).round() as usize).min(width);
    format!("{}●{}", "─".repeat(filled), " ".repeat(width - filled))
}

fn seconds_limit(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).context("invalid --seconds")
}

async fn record(deck: &mut MemoDeck, input: &Path, seconds: Option<f64>) -> Result<()> {
    let limit = match seconds {
        Some(s) => seconds_limit(s)?,
        None => Duration::from_millis(AudioFile::open(input)?.duration_millis),
    };

    deck.toggle_recording().await?;
    info!("Recording for {:.1}s", limit.as_secs_f64());

    let deadline = tokio::time::sleep(limit);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            received = deck.recorder_mut().recv_sample() => {
                if !received {
                    break;
                }
            }
        }
    }

    deck.toggle_recording()
        .await?
        .context("Recording produced no memo")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Record { input, seconds, json } => {
            let mut deck = MemoDeck::new(
                &cfg,
                AudioSlots::global(),
                Box::new(FileCaptureBackend::new(&input)),
                Box::new(FilePlaybackBackend::new()),
            );
            record(&mut deck, &input, seconds).await?;

            let memo = deck.store().latest().context("No memo stored")?;
            if json {
                println!("{}", serde_json::to_string_pretty(memo.as_ref())?);
            } else {
                println!("{}", render_bars(memo.waveform(), &cfg.waveform));
                println!(
                    "{} samples -> {} buckets",
                    memo.metering().len(),
                    memo.waveform().len()
                );
            }
        }
        Command::Demo { input, seconds } => {
            let mut deck = MemoDeck::new(
                &cfg,
                AudioSlots::global(),
                Box::new(FileCaptureBackend::new(&input)),
                Box::new(FilePlaybackBackend::new()),
            );
            record(&mut deck, &input, seconds).await?;

            let memo_id = deck.store().latest().context("No memo stored")?.id();
            deck.select(memo_id).await?;
            deck.toggle_playback().await?;

            let waveform = deck
                .player()
                .memo()
                .map(|memo| render_bars(memo.waveform(), &cfg.waveform))
                .unwrap_or_default();
            println!("{waveform}");

            let width = waveform.chars().count().max(1);
            let mut stdout = std::io::stdout();
            while deck.player_mut().recv_status().await {
                let player = deck.player();
                write!(
                    stdout,
                    "\r{} {:>3.0}% {}",
                    render_progress(player.progress().fraction(), width),
                    player.progress().percent(),
                    player.clock_label()
                )?;
                stdout.flush()?;
                if player.state() == PlaybackState::Finished {
                    break;
                }
            }
            println!();

            deck.player_mut().unload();
        }
    }

    Ok(())
}
