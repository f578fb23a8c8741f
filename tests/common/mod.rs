// Mock capture and playback capabilities shared by the session tests
//
// Every external call is appended to a shared log so tests can assert the
// order in which sessions talk to the audio subsystem.

#![allow(dead_code)]

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use voice_memos::audio::{
    Capture, CaptureBackend, CaptureConfig, CaptureStream, Playback, PlaybackBackend, Player,
    PlayerConfig, StatusReport, StatusSender,
};
use voice_memos::{AudioHandle, SessionError, SessionResult};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Failure a mock capability should report on acquire/open
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    PermissionDenied,
    DeviceUnavailable,
    LoadError,
}

impl Failure {
    fn into_error(self) -> SessionError {
        match self {
            Failure::PermissionDenied => SessionError::PermissionDenied,
            Failure::DeviceUnavailable => SessionError::DeviceUnavailable("mock device busy".into()),
            Failure::LoadError => SessionError::LoadError("mock file missing".into()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockCapture {
    pub log: CallLog,
    pub sender: Arc<Mutex<Option<StatusSender>>>,
    pub fail: Arc<Mutex<Option<Failure>>>,
    pub fail_stop: Arc<Mutex<bool>>,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        let mock = Self::default();
        *mock.fail.lock().unwrap() = Some(failure);
        mock
    }

    pub fn backend(&self) -> Box<dyn CaptureBackend> {
        Box::new(self.clone())
    }

    /// Deliver one metering report, as the capture stream would
    pub fn emit(&self, db: Option<f32>) {
        let sender = self.sender.lock().unwrap();
        sender
            .as_ref()
            .expect("capture not acquired")
            .send(StatusReport::metering(db))
            .expect("session dropped the report channel");
    }

    pub fn emit_report(&self, report: StatusReport) {
        let sender = self.sender.lock().unwrap();
        let _ = sender.as_ref().expect("capture not acquired").send(report);
    }
}

#[async_trait::async_trait]
impl CaptureBackend for MockCapture {
    async fn acquire(&mut self, config: &CaptureConfig) -> SessionResult<Capture> {
        self.log
            .lock()
            .unwrap()
            .push(format!("acquire {}ms", config.metering_interval.as_millis()));

        if let Some(failure) = *self.fail.lock().unwrap() {
            return Err(failure.into_error());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap() = Some(tx);
        Ok(Capture {
            stream: Box::new(MockStream {
                log: Arc::clone(&self.log),
                fail_stop: *self.fail_stop.lock().unwrap(),
            }),
            reports: rx,
        })
    }

    async fn release(&mut self) -> Result<()> {
        self.log.lock().unwrap().push("release".into());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock-capture"
    }
}

struct MockStream {
    log: CallLog,
    fail_stop: bool,
}

#[async_trait::async_trait]
impl CaptureStream for MockStream {
    async fn stop(&mut self) -> Result<AudioHandle> {
        self.log.lock().unwrap().push("stop".into());
        if self.fail_stop {
            anyhow::bail!("mock stream refused to finalize");
        }
        Ok(AudioHandle::new("mock://recording.m4a"))
    }

    fn abort(&mut self) {
        self.log.lock().unwrap().push("abort".into());
    }
}

#[derive(Clone, Default)]
pub struct MockPlayback {
    pub log: CallLog,
    pub sender: Arc<Mutex<Option<StatusSender>>>,
    pub fail: Arc<Mutex<Option<Failure>>>,
    pub position: Arc<Mutex<u64>>,
    pub fail_play: Arc<Mutex<bool>>,
    pub fail_pause: Arc<Mutex<bool>>,
}

impl MockPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mock = Self::default();
        *mock.fail.lock().unwrap() = Some(Failure::LoadError);
        mock
    }

    pub fn backend(&self) -> Box<dyn PlaybackBackend> {
        Box::new(self.clone())
    }

    pub fn emit(&self, report: StatusReport) {
        let sender = self.sender.lock().unwrap();
        let _ = sender.as_ref().expect("player not opened").send(report);
    }

    pub fn position(&self) -> u64 {
        *self.position.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl PlaybackBackend for MockPlayback {
    async fn open(&mut self, handle: &AudioHandle, _config: &PlayerConfig) -> SessionResult<Playback> {
        self.log.lock().unwrap().push(format!("open {}", handle.uri()));

        if let Some(failure) = *self.fail.lock().unwrap() {
            return Err(failure.into_error());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap() = Some(tx);
        Ok(Playback {
            player: Box::new(MockPlayer {
                log: Arc::clone(&self.log),
                position: Arc::clone(&self.position),
                fail_play: Arc::clone(&self.fail_play),
                fail_pause: Arc::clone(&self.fail_pause),
            }),
            reports: rx,
        })
    }

    fn name(&self) -> &str {
        "mock-playback"
    }
}

struct MockPlayer {
    log: CallLog,
    position: Arc<Mutex<u64>>,
    fail_play: Arc<Mutex<bool>>,
    fail_pause: Arc<Mutex<bool>>,
}

#[async_trait::async_trait]
impl Player for MockPlayer {
    async fn play(&mut self) -> Result<()> {
        self.log.lock().unwrap().push("play".into());
        if *self.fail_play.lock().unwrap() {
            anyhow::bail!("mock player refused to play");
        }
        Ok(())
    }

    async fn pause(&mut self) -> Result<()> {
        self.log.lock().unwrap().push("pause".into());
        if *self.fail_pause.lock().unwrap() {
            anyhow::bail!("mock player refused to pause");
        }
        Ok(())
    }

    async fn seek(&mut self, position_millis: u64) -> Result<()> {
        self.log.lock().unwrap().push(format!("seek {position_millis}"));
        *self.position.lock().unwrap() = position_millis;
        Ok(())
    }

    fn close(&mut self) {
        self.log.lock().unwrap().push("close".into());
    }
}
