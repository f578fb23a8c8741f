//! Recording lifecycle
//!
//! This module provides the `RecordingSession` abstraction that manages:
//! - Microphone acquisition through a `CaptureBackend`
//! - Accumulation of metering samples while recording
//! - Turning a finished capture into an immutable `Memo`

mod buffer;
mod session;
mod stats;

pub use buffer::MeteringBuffer;
pub use session::{RecordingSession, RecordingState};
pub use stats::RecordingStats;
