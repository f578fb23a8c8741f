pub mod audio;
pub mod config;
pub mod deck;
pub mod error;
pub mod memo;
pub mod playback;
pub mod recording;
pub mod slots;
pub mod store;
pub mod waveform;

pub use audio::{
    AudioFile, AudioHandle, CaptureBackend, CaptureConfig, CaptureStream, FileCaptureBackend,
    FilePlaybackBackend, PlaybackBackend, Player, PlayerConfig, QualityPreset, StatusReport,
};
pub use config::Config;
pub use deck::MemoDeck;
pub use error::{SessionError, SessionResult};
pub use memo::{Memo, MemoId};
pub use playback::{format_clock, PlaybackProgress, PlaybackSession, PlaybackState};
pub use recording::{MeteringBuffer, RecordingSession, RecordingState, RecordingStats};
pub use slots::{AudioSlots, SlotKind};
pub use store::MemoStore;
pub use waveform::{normalize, NormalizedWaveform, WaveformNormalizer};
