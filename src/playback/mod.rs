//! Playback lifecycle
//!
//! `PlaybackSession` drives one loaded memo through
//! Unloaded → Loaded → (Playing ⇄ Paused) → Finished, with the transition
//! table in `state` as the single source of truth.

mod progress;
mod session;
mod state;

pub use progress::{format_clock, PlaybackProgress};
pub use session::PlaybackSession;
pub use state::{PlaybackEvent, PlaybackState};
