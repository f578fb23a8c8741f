use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::SessionResult;

/// Opaque reference to a recorded audio resource owned by the audio subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AudioHandle {
    uri: String,
}

impl AudioHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(path.as_ref().display().to_string())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Interpret the handle as a filesystem path (file-backed capabilities)
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.uri)
    }
}

/// Status report delivered by a capture stream or a player
///
/// Capture streams fill `metering_db`; players fill the position fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    pub is_loaded_or_active: bool,
    pub is_playing: bool,
    pub position_millis: Option<u64>,
    pub duration_millis: Option<u64>,
    pub metering_db: Option<f32>,
    pub just_finished: bool,
}

impl StatusReport {
    /// A capture-side metering report
    pub fn metering(db: Option<f32>) -> Self {
        Self {
            is_loaded_or_active: true,
            metering_db: db,
            ..Self::default()
        }
    }

    /// A player-side position report
    pub fn position(position_millis: u64, duration_millis: u64, is_playing: bool) -> Self {
        Self {
            is_loaded_or_active: true,
            is_playing,
            position_millis: Some(position_millis),
            duration_millis: Some(duration_millis),
            ..Self::default()
        }
    }

    /// A player-side report signalling the track just reached its end
    pub fn finished(duration_millis: u64) -> Self {
        Self {
            just_finished: true,
            ..Self::position(duration_millis, duration_millis, false)
        }
    }
}

/// Receiving end of a capability's status callbacks
pub type StatusReceiver = mpsc::UnboundedReceiver<StatusReport>;
pub type StatusSender = mpsc::UnboundedSender<StatusReport>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    #[default]
    High,
    Low,
}

/// Configuration handed to a capture backend
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub preset: QualityPreset,
    /// Interval between metering reports
    pub metering_interval: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            preset: QualityPreset::High,
            metering_interval: Duration::from_millis(100),
        }
    }
}

/// Configuration handed to a playback backend
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Interval between position reports (~60 per second)
    pub progress_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_micros(16_666),
        }
    }
}

/// A started capture: the stream handle plus its report channel
pub struct Capture {
    pub stream: Box<dyn CaptureStream>,
    pub reports: StatusReceiver,
}

/// Microphone capture capability
///
/// Implementations:
/// - `FileCaptureBackend`: replays a WAV file as a live source
/// - platform microphones live outside this crate
#[async_trait::async_trait]
pub trait CaptureBackend: Send {
    /// Acquire the microphone and start a metered capture stream
    ///
    /// Must fail with `PermissionDenied` or `DeviceUnavailable` without leaving
    /// anything half-acquired.
    async fn acquire(&mut self, config: &CaptureConfig) -> SessionResult<Capture>;

    /// Give the microphone back after a capture ends or fails to start
    async fn release(&mut self) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
pub trait CaptureStream: Send {
    /// Stop capturing and hand back the recorded audio
    async fn stop(&mut self) -> Result<AudioHandle>;

    /// Tear the stream down without producing audio
    fn abort(&mut self);
}

/// An opened player: the transport handle plus its report channel
pub struct Playback {
    pub player: Box<dyn Player>,
    pub reports: StatusReceiver,
}

/// Decode/playback capability
#[async_trait::async_trait]
pub trait PlaybackBackend: Send {
    /// Decode `handle` and prepare it for playback; fails with `LoadError`
    async fn open(&mut self, handle: &AudioHandle, config: &PlayerConfig)
        -> SessionResult<Playback>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
pub trait Player: Send {
    async fn play(&mut self) -> Result<()>;
    async fn pause(&mut self) -> Result<()>;
    async fn seek(&mut self, position_millis: u64) -> Result<()>;

    /// Release the decoded resource
    fn close(&mut self);
}
