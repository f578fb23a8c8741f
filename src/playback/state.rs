use crate::error::{SessionError, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Unloaded,
    Loaded,
    Playing,
    Paused,
    Finished,
}

/// Everything that can move a playback session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Load,
    Play,
    Pause,
    /// The player reported the track just completed
    Finish,
    /// Play again from position zero after finishing
    Restart,
    Unload,
}

impl PlaybackEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackEvent::Load => "load",
            PlaybackEvent::Play => "play",
            PlaybackEvent::Pause => "pause",
            PlaybackEvent::Finish => "finish",
            PlaybackEvent::Restart => "restart",
            PlaybackEvent::Unload => "unload",
        }
    }
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Unloaded => "unloaded",
            PlaybackState::Loaded => "loaded",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "finished",
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, PlaybackState::Unloaded)
    }

    /// The state reached by applying `event`, or `InvalidTransition`
    pub fn next(self, event: PlaybackEvent) -> SessionResult<PlaybackState> {
        use PlaybackEvent as E;
        use PlaybackState as S;

        match (self, event) {
            (S::Unloaded, E::Load) => Ok(S::Loaded),
            (S::Loaded | S::Paused, E::Play) => Ok(S::Playing),
            (S::Finished, E::Restart) => Ok(S::Playing),
            (S::Playing, E::Pause) => Ok(S::Paused),
            (S::Loaded | S::Playing | S::Paused, E::Finish) => Ok(S::Finished),
            (S::Loaded | S::Playing | S::Paused | S::Finished, E::Unload) => Ok(S::Unloaded),
            (state, event) => Err(SessionError::InvalidTransition {
                operation: event.as_str(),
                state: state.as_str(),
            }),
        }
    }
}
