// File-backed playback capability
//
// The transport is simulated against the WAV file's duration: a ticker task
// advances the position while playing and reports it at the progress
// interval. Reaching the end reports `just_finished` once and stops.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::backend::{
    AudioHandle, Playback, PlaybackBackend, Player, PlayerConfig, StatusReport, StatusSender,
};
use super::file::AudioFile;
use crate::error::{SessionError, SessionResult};

#[derive(Debug, Default)]
pub struct FilePlaybackBackend;

impl FilePlaybackBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PlaybackBackend for FilePlaybackBackend {
    async fn open(
        &mut self,
        handle: &AudioHandle,
        config: &PlayerConfig,
    ) -> SessionResult<Playback> {
        let audio =
            AudioFile::open(handle.path()).map_err(|e| SessionError::LoadError(format!("{e:#}")))?;

        let transport = Arc::new(Mutex::new(Transport {
            playing: false,
            position: Duration::ZERO,
            duration: Duration::from_millis(audio.duration_millis),
        }));
        let (tx, rx) = mpsc::unbounded_channel();

        let ticker_transport = Arc::clone(&transport);
        let ticker_tx = tx.clone();
        let interval = config.progress_interval;
        let ticker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let mut transport = ticker_transport.lock().await;
                if !transport.playing {
                    continue;
                }

                transport.position = (transport.position + interval).min(transport.duration);
                let report = if transport.position >= transport.duration {
                    transport.playing = false;
                    debug!("File playback reached the end");
                    StatusReport::finished(transport.duration_millis())
                } else {
                    transport.report()
                };

                if ticker_tx.send(report).is_err() {
                    break;
                }
            }
        });

        info!(
            "File player opened: {} ({}ms)",
            handle.uri(),
            audio.duration_millis
        );

        Ok(Playback {
            player: Box::new(FilePlayer {
                transport,
                reports: tx,
                ticker: Some(ticker),
            }),
            reports: rx,
        })
    }

    fn name(&self) -> &str {
        "file-playback"
    }
}

struct Transport {
    playing: bool,
    position: Duration,
    duration: Duration,
}

impl Transport {
    fn duration_millis(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    fn report(&self) -> StatusReport {
        StatusReport::position(
            self.position.as_millis() as u64,
            self.duration_millis(),
            self.playing,
        )
    }
}

struct FilePlayer {
    transport: Arc<Mutex<Transport>>,
    reports: StatusSender,
    ticker: Option<JoinHandle<()>>,
}

impl FilePlayer {
    async fn update(&self, apply: impl FnOnce(&mut Transport) + Send) -> Result<()> {
        let mut transport = self.transport.lock().await;
        apply(&mut transport);
        self.reports
            .send(transport.report())
            .context("Player report channel closed")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Player for FilePlayer {
    async fn play(&mut self) -> Result<()> {
        self.update(|t| t.playing = true).await
    }

    async fn pause(&mut self) -> Result<()> {
        self.update(|t| t.playing = false).await
    }

    async fn seek(&mut self, position_millis: u64) -> Result<()> {
        self.update(|t| t.position = Duration::from_millis(position_millis).min(t.duration))
            .await
    }

    fn close(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for FilePlayer {
    fn drop(&mut self) {
        self.close();
    }
}
