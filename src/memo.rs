use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::audio::AudioHandle;
use crate::waveform::{NormalizedWaveform, WaveformNormalizer};

pub type MemoId = Uuid;

/// A completed recording
///
/// Built once when a recording stops and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Memo {
    id: MemoId,
    created_at: DateTime<Utc>,
    audio_handle: AudioHandle,
    /// Raw metering samples in capture order, one per metering interval
    metering: Vec<f32>,
    waveform: NormalizedWaveform,
}

impl Memo {
    /// Build a memo from a finished capture, computing its waveform once
    pub fn new(
        audio_handle: AudioHandle,
        metering: Vec<f32>,
        normalizer: &WaveformNormalizer,
    ) -> Self {
        let waveform = normalizer.normalize(&metering);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            audio_handle,
            metering,
            waveform,
        }
    }

    pub fn id(&self) -> MemoId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn audio_handle(&self) -> &AudioHandle {
        &self.audio_handle
    }

    pub fn metering(&self) -> &[f32] {
        &self.metering
    }

    pub fn waveform(&self) -> &NormalizedWaveform {
        &self.waveform
    }
}
