use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

use super::progress::{format_clock, PlaybackProgress};
use super::state::{PlaybackEvent, PlaybackState};
use crate::audio::{PlaybackBackend, Player, PlayerConfig, StatusReceiver, StatusReport};
use crate::error::{SessionError, SessionResult};
use crate::memo::Memo;
use crate::slots::{AudioSlots, SlotGuard, SlotKind};

/// Everything that only exists while a memo is loaded
struct LoadedMemo {
    memo: Arc<Memo>,
    player: Box<dyn Player>,
    reports: StatusReceiver,
    _slot: SlotGuard,
}

/// Owns the playback lifecycle of one memo at a time
///
/// Every successful `load()` must be paired with `unload()`; dropping a
/// loaded session unloads it.
pub struct PlaybackSession {
    backend: Box<dyn PlaybackBackend>,
    player_config: PlayerConfig,
    progress_scale: f32,
    slots: AudioSlots,
    state: PlaybackState,
    loaded: Option<LoadedMemo>,
    progress: PlaybackProgress,
    is_playing: bool,
    position_millis: u64,
    duration_millis: u64,
}

impl PlaybackSession {
    pub fn new(
        backend: Box<dyn PlaybackBackend>,
        player_config: PlayerConfig,
        slots: AudioSlots,
    ) -> Self {
        Self {
            backend,
            player_config,
            progress_scale: PlaybackProgress::DEFAULT_SCALE,
            slots,
            state: PlaybackState::Unloaded,
            loaded: None,
            progress: PlaybackProgress::ZERO,
            is_playing: false,
            position_millis: 0,
            duration_millis: 0,
        }
    }

    /// Override how much of the track the progress indicator may travel
    ///
    /// The scale is kept within `(0, 1]`; NaN or non-positive values fall
    /// back to 0.95.
    pub fn with_progress_scale(mut self, scale: f32) -> Self {
        let usable = PlaybackProgress::usable_scale(scale);
        if usable != scale {
            warn!("Progress scale {} is out of range, using {}", scale, usable);
        }
        self.progress_scale = usable;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn memo(&self) -> Option<&Arc<Memo>> {
        self.loaded.as_ref().map(|loaded| &loaded.memo)
    }

    pub fn progress(&self) -> PlaybackProgress {
        self.progress
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position_millis(&self) -> u64 {
        self.position_millis
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    /// Position while playing, total duration otherwise
    pub fn clock_millis(&self) -> u64 {
        if self.is_playing {
            self.position_millis
        } else {
            self.duration_millis
        }
    }

    pub fn clock_label(&self) -> String {
        format_clock(self.clock_millis())
    }

    fn transition(&mut self, event: PlaybackEvent) -> bool {
        match self.state.next(event) {
            Ok(next) => {
                debug!("Playback {} -> {}", self.state.as_str(), next.as_str());
                self.state = next;
                true
            }
            Err(e) => {
                warn!("Ignoring playback request: {}", e);
                false
            }
        }
    }

    /// Decode the memo's audio and prepare it for playback
    pub async fn load(&mut self, memo: Arc<Memo>) -> SessionResult<()> {
        if let Err(e) = self.state.next(PlaybackEvent::Load) {
            warn!("Ignoring load request: {}", e);
            return Ok(());
        }

        let slot = self.slots.claim(SlotKind::Playback).ok_or_else(|| {
            SessionError::LoadError("another memo is already loaded".to_string())
        })?;

        info!("Loading sound {} via {}", memo.audio_handle().uri(), self.backend.name());

        let playback = self
            .backend
            .open(memo.audio_handle(), &self.player_config)
            .await
            .map_err(|e| {
                error!("Failed to load sound: {}", e);
                e
            })?;

        self.loaded = Some(LoadedMemo {
            memo,
            player: playback.player,
            reports: playback.reports,
            _slot: slot,
        });
        self.transition(PlaybackEvent::Load);
        Ok(())
    }

    /// Play/pause control
    ///
    /// Pauses while playing; otherwise plays, rewinding first if the track
    /// finished. Does nothing when unloaded.
    pub async fn toggle(&mut self) -> SessionResult<()> {
        let Some(loaded) = self.loaded.as_mut() else {
            debug!("Nothing loaded to toggle");
            return Ok(());
        };

        match self.state {
            PlaybackState::Playing => {
                info!("Pausing sound");
                loaded.player.pause().await?;
                self.is_playing = false;
                self.transition(PlaybackEvent::Pause);
            }
            PlaybackState::Finished => {
                info!("Replaying sound from the start");
                loaded.player.seek(0).await?;
                loaded.player.play().await?;
                self.position_millis = 0;
                self.progress = PlaybackProgress::ZERO;
                self.is_playing = true;
                self.transition(PlaybackEvent::Restart);
            }
            PlaybackState::Loaded | PlaybackState::Paused => {
                info!("Playing sound");
                loaded.player.play().await?;
                self.is_playing = true;
                self.transition(PlaybackEvent::Play);
            }
            PlaybackState::Unloaded => {}
        }
        Ok(())
    }

    /// Apply one position report from the player
    pub fn on_status_update(&mut self, status: StatusReport) {
        if !self.state.is_loaded() {
            debug!("Ignoring status report while unloaded");
            return;
        }
        if !status.is_loaded_or_active {
            return;
        }

        let position = status.position_millis.unwrap_or(0);
        let duration = status.duration_millis.unwrap_or(0);
        self.progress = PlaybackProgress::from_position(position, duration, self.progress_scale);
        self.position_millis = position;
        self.duration_millis = duration;

        if status.just_finished {
            info!("Finished");
            self.progress = PlaybackProgress::ZERO;
            self.is_playing = false;
            self.transition(PlaybackEvent::Finish);
        } else {
            self.is_playing = status.is_playing;
        }
    }

    /// Apply every report the player has already delivered
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let next = match &mut self.loaded {
                Some(loaded) => loaded.reports.try_recv(),
                None => return applied,
            };
            match next {
                Ok(status) => {
                    self.on_status_update(status);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Wait for the next player report and apply it
    ///
    /// Returns `false` when unloaded or once the player closed its channel.
    pub async fn recv_status(&mut self) -> bool {
        let status = match &mut self.loaded {
            Some(loaded) => loaded.reports.recv().await,
            None => return false,
        };
        match status {
            Some(status) => {
                self.on_status_update(status);
                true
            }
            None => false,
        }
    }

    /// Release the decoded audio and stop listening for reports
    pub fn unload(&mut self) {
        let Some(mut loaded) = self.loaded.take() else {
            debug!("Nothing loaded to unload");
            return;
        };

        info!("Unloading sound {}", loaded.memo.audio_handle().uri());
        loaded.player.close();
        self.transition(PlaybackEvent::Unload);
        self.progress = PlaybackProgress::ZERO;
        self.is_playing = false;
        self.position_millis = 0;
        self.duration_millis = 0;
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.unload();
    }
}
