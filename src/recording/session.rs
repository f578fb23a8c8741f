use chrono::{DateTime, Utc};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

use super::buffer::MeteringBuffer;
use super::stats::RecordingStats;
use crate::audio::{CaptureBackend, CaptureConfig, CaptureStream, StatusReceiver, StatusReport};
use crate::error::{SessionError, SessionResult};
use crate::memo::Memo;
use crate::slots::{AudioSlots, SlotGuard, SlotKind};
use crate::waveform::WaveformNormalizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
}

impl RecordingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingState::Idle => "idle",
            RecordingState::Recording => "recording",
        }
    }
}

/// Everything that only exists while a capture is running
struct ActiveCapture {
    stream: Box<dyn CaptureStream>,
    reports: StatusReceiver,
    buffer: MeteringBuffer,
    started_at: DateTime<Utc>,
    _slot: SlotGuard,
}

/// Owns the lifecycle of one recording at a time: Idle → Recording → Idle
pub struct RecordingSession {
    backend: Box<dyn CaptureBackend>,
    capture_config: CaptureConfig,
    missing_sample_db: f32,
    normalizer: WaveformNormalizer,
    slots: AudioSlots,
    active: Option<ActiveCapture>,
}

impl RecordingSession {
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        capture_config: CaptureConfig,
        normalizer: WaveformNormalizer,
        slots: AudioSlots,
    ) -> Self {
        Self {
            backend,
            capture_config,
            missing_sample_db: crate::audio::metering::SILENCE_FLOOR_DB,
            normalizer,
            slots,
            active: None,
        }
    }

    /// Override the value recorded for missing metering samples
    pub fn with_missing_sample_db(mut self, db: f32) -> Self {
        self.missing_sample_db = db;
        self
    }

    pub fn state(&self) -> RecordingState {
        if self.active.is_some() {
            RecordingState::Recording
        } else {
            RecordingState::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Samples collected so far in the current recording
    pub fn samples(&self) -> &[f32] {
        self.active
            .as_ref()
            .map(|active| active.buffer.as_slice())
            .unwrap_or(&[])
    }

    /// Start recording
    pub async fn start(&mut self) -> SessionResult<()> {
        if self.active.is_some() {
            warn!("Recording already started");
            return Ok(());
        }

        let slot = self.slots.claim(SlotKind::Recording).ok_or_else(|| {
            SessionError::DeviceUnavailable("another recording is in progress".to_string())
        })?;

        info!("Starting recording via {}", self.backend.name());

        let capture = match self.backend.acquire(&self.capture_config).await {
            Ok(capture) => capture,
            Err(e) => {
                error!("Failed to start recording: {}", e);
                if let Err(release_err) = self.backend.release().await {
                    warn!("Failed to release microphone: {:#}", release_err);
                }
                return Err(e);
            }
        };

        self.active = Some(ActiveCapture {
            stream: capture.stream,
            reports: capture.reports,
            buffer: MeteringBuffer::new(self.missing_sample_db),
            started_at: Utc::now(),
            _slot: slot,
        });

        info!(
            "Recording started ({}ms metering interval)",
            self.capture_config.metering_interval.as_millis()
        );
        Ok(())
    }

    /// Record one metering reading; `None` stands for a missing sample
    pub fn on_metering_sample(&mut self, sample: Option<f32>) {
        match &mut self.active {
            Some(active) => active.buffer.push(sample),
            None => debug!("Ignoring metering sample while idle"),
        }
    }

    fn apply(&mut self, report: StatusReport) {
        if report.is_loaded_or_active {
            self.on_metering_sample(report.metering_db);
        } else {
            debug!("Ignoring inactive capture report");
        }
    }

    /// Apply every report the capture stream has already delivered
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let next = match &mut self.active {
                Some(active) => active.reports.try_recv(),
                None => return applied,
            };
            match next {
                Ok(report) => {
                    self.apply(report);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Wait for the next report and apply it
    ///
    /// Returns `false` when idle or once the capture stream closed its channel.
    pub async fn recv_sample(&mut self) -> bool {
        let report = match &mut self.active {
            Some(active) => active.reports.recv().await,
            None => return false,
        };
        match report {
            Some(report) => {
                self.apply(report);
                true
            }
            None => false,
        }
    }

    /// Stop recording and produce the memo
    ///
    /// Returns `Ok(None)` when no recording is active.
    pub async fn stop(&mut self) -> SessionResult<Option<Memo>> {
        // Everything delivered before stop() counts; nothing after it does
        self.pump();

        let Some(mut active) = self.active.take() else {
            warn!("Recording not active");
            return Ok(None);
        };

        info!("Stopping recording ({} samples)", active.buffer.len());

        let stopped = active.stream.stop().await;
        drop(active.reports);

        if let Err(e) = self.backend.release().await {
            warn!("Failed to release microphone: {:#}", e);
        }

        let handle = match stopped {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to stop capture stream: {:#}", e);
                return Err(SessionError::Backend(e));
            }
        };

        let memo = Memo::new(handle, active.buffer.take(), &self.normalizer);
        info!(
            "Recording stopped and stored at {} ({} samples, {} buckets)",
            memo.audio_handle().uri(),
            memo.metering().len(),
            memo.waveform().len()
        );

        Ok(Some(memo))
    }

    /// Get current recording statistics
    pub fn stats(&self) -> RecordingStats {
        match &self.active {
            Some(active) => {
                let elapsed = Utc::now().signed_duration_since(active.started_at);
                RecordingStats {
                    is_recording: true,
                    started_at: Some(active.started_at),
                    elapsed_secs: elapsed.num_milliseconds() as f64 / 1000.0,
                    samples_count: active.buffer.len(),
                }
            }
            None => RecordingStats {
                is_recording: false,
                started_at: None,
                elapsed_secs: 0.0,
                samples_count: 0,
            },
        }
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if let Some(mut active) = self.active.take() {
            warn!(
                "Recording session dropped while recording; discarding {} samples",
                active.buffer.len()
            );
            active.stream.abort();
        }
    }
}
