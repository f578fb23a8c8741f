use thiserror::Error;

/// Errors surfaced by recording and playback sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user (or platform) refused microphone access
    #[error("microphone permission denied")]
    PermissionDenied,

    /// The capture device could not be acquired
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The recorded audio could not be opened for playback
    #[error("failed to load audio: {0}")]
    LoadError(String),

    /// An operation was requested from a state that does not permit it
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    /// An external capability failed after acquisition (play, pause, seek, stop)
    #[error("audio backend failure: {0:#}")]
    Backend(#[from] anyhow::Error),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
