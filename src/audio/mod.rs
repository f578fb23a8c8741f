pub mod backend;
pub mod file;
pub mod file_capture;
pub mod file_player;
pub mod metering;

pub use backend::{
    AudioHandle, Capture, CaptureBackend, CaptureConfig, CaptureStream, Playback, PlaybackBackend,
    Player, PlayerConfig, QualityPreset, StatusReceiver, StatusReport, StatusSender,
};
pub use file::AudioFile;
pub use file_capture::FileCaptureBackend;
pub use file_player::FilePlaybackBackend;
