use std::sync::Arc;
use tracing::{debug, info};

use crate::audio::{CaptureBackend, PlaybackBackend};
use crate::config::Config;
use crate::error::{SessionError, SessionResult};
use crate::memo::{Memo, MemoId};
use crate::playback::PlaybackSession;
use crate::recording::RecordingSession;
use crate::slots::AudioSlots;
use crate::store::MemoStore;
use crate::waveform::WaveformNormalizer;

/// The memo list plus the single recording slot and single playback slot
pub struct MemoDeck {
    store: MemoStore,
    recorder: RecordingSession,
    player: PlaybackSession,
}

impl MemoDeck {
    /// Build a deck whose sessions claim from `slots`
    ///
    /// Decks sharing one `AudioSlots` (normally `AudioSlots::global()`) never
    /// record or play at the same time.
    pub fn new(
        config: &Config,
        slots: AudioSlots,
        capture: Box<dyn CaptureBackend>,
        playback: Box<dyn PlaybackBackend>,
    ) -> Self {
        let recorder = RecordingSession::new(
            capture,
            config.recording.capture_config(),
            WaveformNormalizer::new(config.waveform.clone()),
            slots.clone(),
        )
        .with_missing_sample_db(config.recording.missing_sample_db);
        let player = PlaybackSession::new(playback, config.playback.player_config(), slots)
            .with_progress_scale(config.playback.progress_scale);

        Self {
            store: MemoStore::new(),
            recorder,
            player,
        }
    }

    pub fn store(&self) -> &MemoStore {
        &self.store
    }

    pub fn recorder(&self) -> &RecordingSession {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut RecordingSession {
        &mut self.recorder
    }

    pub fn player(&self) -> &PlaybackSession {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackSession {
        &mut self.player
    }

    /// Start or stop recording, whichever applies
    ///
    /// Returns the new memo when this call stopped a recording.
    pub async fn toggle_recording(&mut self) -> SessionResult<Option<Arc<Memo>>> {
        if self.recorder.is_recording() {
            self.finish_recording().await
        } else {
            self.recorder.start().await?;
            Ok(None)
        }
    }

    /// Stop the active recording and put its memo at the top of the list
    pub async fn finish_recording(&mut self) -> SessionResult<Option<Arc<Memo>>> {
        let Some(memo) = self.recorder.stop().await? else {
            return Ok(None);
        };
        let memo = self.store.insert(memo);
        info!("Stored memo {} ({} memos)", memo.id(), self.store.len());
        Ok(Some(memo))
    }

    /// Make `id` the memo loaded for playback, unloading any previous one first
    pub async fn select(&mut self, id: MemoId) -> SessionResult<()> {
        let memo = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::LoadError(format!("unknown memo {id}")))?;

        if self.player.memo().is_some_and(|loaded| loaded.id() == id) {
            debug!("Memo {} already loaded", id);
            return Ok(());
        }

        self.player.unload();
        self.player.load(memo).await
    }

    pub async fn toggle_playback(&mut self) -> SessionResult<()> {
        self.player.toggle().await
    }
}
