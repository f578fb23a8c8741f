use std::mem;
use tracing::debug;

use crate::audio::metering::SILENCE_FLOOR_DB;

/// Metering samples collected during one recording
///
/// Every report appends exactly one value, so the length tracks elapsed
/// capture time at the metering interval.
#[derive(Debug, Clone)]
pub struct MeteringBuffer {
    samples: Vec<f32>,
    missing_fill: f32,
}

impl Default for MeteringBuffer {
    fn default() -> Self {
        Self::new(SILENCE_FLOOR_DB)
    }
}

impl MeteringBuffer {
    pub fn new(missing_fill: f32) -> Self {
        Self {
            samples: Vec::new(),
            missing_fill,
        }
    }

    /// Append a reading; a missing one is recorded as the fill value
    pub fn push(&mut self, sample: Option<f32>) {
        let value = match sample {
            Some(db) if db.is_finite() => db,
            _ => {
                debug!("Missing metering sample, recording {} dB", self.missing_fill);
                self.missing_fill
            }
        };
        self.samples.push(value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Hand the collected samples over, leaving the buffer empty
    pub fn take(&mut self) -> Vec<f32> {
        mem::take(&mut self.samples)
    }
}
