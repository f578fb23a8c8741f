// File-backed capture capability
//
// Replays a WAV file as if it were a live microphone: one metering report is
// emitted per configured interval until the file runs out, at which point the
// report channel closes.

use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::backend::{AudioHandle, Capture, CaptureBackend, CaptureConfig, CaptureStream, StatusReport};
use super::file::AudioFile;
use crate::error::{SessionError, SessionResult};

pub struct FileCaptureBackend {
    source: PathBuf,
    acquired: bool,
}

impl FileCaptureBackend {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            acquired: false,
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for FileCaptureBackend {
    async fn acquire(&mut self, config: &CaptureConfig) -> SessionResult<Capture> {
        let audio = AudioFile::open(&self.source)
            .map_err(|e| SessionError::DeviceUnavailable(format!("{e:#}")))?;

        let levels = audio.metering_levels(config.metering_interval);
        info!(
            "File capture acquired: {} ({:?} preset, {} metering windows)",
            audio.path,
            config.preset,
            levels.len()
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let interval = config.metering_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately; the first window is reported one interval in
            ticker.tick().await;
            for db in levels {
                ticker.tick().await;
                if tx.send(StatusReport::metering(Some(db))).is_err() {
                    break;
                }
            }
            debug!("File capture source exhausted");
        });

        self.acquired = true;
        Ok(Capture {
            stream: Box::new(FileCaptureStream {
                handle: AudioHandle::from_path(&self.source),
                task: Some(task),
            }),
            reports: rx,
        })
    }

    async fn release(&mut self) -> Result<()> {
        if self.acquired {
            info!("File capture released: {}", self.source.display());
        }
        self.acquired = false;
        Ok(())
    }

    fn name(&self) -> &str {
        "file-capture"
    }
}

struct FileCaptureStream {
    handle: AudioHandle,
    task: Option<JoinHandle<()>>,
}

#[async_trait::async_trait]
impl CaptureStream for FileCaptureStream {
    async fn stop(&mut self) -> Result<AudioHandle> {
        self.abort();
        Ok(self.handle.clone())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
