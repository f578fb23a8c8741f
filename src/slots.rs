//! Process-wide audio slots
//!
//! The audio subsystem supports one active capture and one loaded player at a
//! time. Sessions claim a slot before touching the subsystem and hold the
//! returned guard for as long as the resource is live; dropping the guard
//! frees the slot on every exit path.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Recording,
    Playback,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Recording => f.write_str("recording"),
            SlotKind::Playback => f.write_str("playback"),
        }
    }
}

/// Shared arena holding the recording and playback slots
#[derive(Debug, Clone, Default)]
pub struct AudioSlots {
    recording: Arc<AtomicBool>,
    playback: Arc<AtomicBool>,
}

impl AudioSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slots shared by every session in this process
    pub fn global() -> Self {
        static GLOBAL: OnceLock<AudioSlots> = OnceLock::new();
        GLOBAL.get_or_init(AudioSlots::new).clone()
    }

    fn flag(&self, kind: SlotKind) -> &Arc<AtomicBool> {
        match kind {
            SlotKind::Recording => &self.recording,
            SlotKind::Playback => &self.playback,
        }
    }

    /// Claim a slot, or `None` if another session already holds it
    pub fn claim(&self, kind: SlotKind) -> Option<SlotGuard> {
        let flag = self.flag(kind);
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        debug!("Claimed {} slot", kind);
        Some(SlotGuard {
            kind,
            flag: Arc::clone(flag),
        })
    }

    pub fn is_busy(&self, kind: SlotKind) -> bool {
        self.flag(kind).load(Ordering::SeqCst)
    }
}

/// Ownership of one slot; released on drop
#[derive(Debug)]
pub struct SlotGuard {
    kind: SlotKind,
    flag: Arc<AtomicBool>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        debug!("Released {} slot", self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_is_exclusive_until_guard_drops() {
        let slots = AudioSlots::new();
        let guard = slots.claim(SlotKind::Recording).expect("first claim");
        assert!(slots.is_busy(SlotKind::Recording));
        assert!(slots.claim(SlotKind::Recording).is_none());

        drop(guard);
        assert!(!slots.is_busy(SlotKind::Recording));
        assert!(slots.claim(SlotKind::Recording).is_some());
    }

    #[test]
    fn recording_and_playback_are_independent() {
        let slots = AudioSlots::new();
        let _rec = slots.claim(SlotKind::Recording).expect("recording");
        let _play = slots.claim(SlotKind::Playback).expect("playback");
        assert!(slots.is_busy(SlotKind::Recording));
        assert!(slots.is_busy(SlotKind::Playback));
    }

    #[test]
    fn clones_share_the_same_slots() {
        let slots = AudioSlots::new();
        let other = slots.clone();
        let _guard = slots.claim(SlotKind::Playback).expect("claim");
        assert!(other.claim(SlotKind::Playback).is_none());
    }

    #[test]
    fn global_slots_are_one_arena() {
        let guard = AudioSlots::global().claim(SlotKind::Recording).expect("claim");
        assert!(AudioSlots::global().claim(SlotKind::Recording).is_none());
        drop(guard);
        assert!(!AudioSlots::global().is_busy(SlotKind::Recording));
    }
}
