//! Fixed-width waveform buckets from metering samples
//!
//! A recording yields one metering sample per interval, so its length grows
//! with duration. Rendering wants a bounded number of bars:
//! - short recordings are padded symmetrically with a neutral level up to the
//!   fill threshold (the result is *not* stretched to the full length);
//! - long recordings keep only their first `length` samples.

use serde::Serialize;

use crate::config::WaveformConfig;

/// Bucketed loudness values ready for rendering
///
/// Immutable once built; adjustments for display go through
/// [`NormalizedWaveform::bar_heights`], which returns a new vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedWaveform(Vec<f32>);

impl NormalizedWaveform {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map each bucket from `[bar_floor_db, 0]` onto `[bar_min_height, bar_max_height]`
    pub fn bar_heights(&self, config: &WaveformConfig) -> Vec<f32> {
        let floor = config.bar_floor_db;
        let span = config.bar_max_height - config.bar_min_height;
        self.0
            .iter()
            .map(|&db| {
                let t = ((db - floor) / -floor).clamp(0.0, 1.0);
                config.bar_min_height + t * span
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaveformNormalizer {
    config: WaveformConfig,
}

impl WaveformNormalizer {
    pub fn new(config: WaveformConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, samples: &[f32]) -> NormalizedWaveform {
        let fill = self.config.fill_threshold;
        let n = samples.len();

        if n < fill {
            let prepend = (fill - n) / 2;
            let append = fill - n - prepend;
            let pad = self.config.padding_db;

            let mut buckets = Vec::with_capacity(fill);
            buckets.extend(std::iter::repeat(pad).take(prepend));
            buckets.extend_from_slice(samples);
            buckets.extend(std::iter::repeat(pad).take(append));
            return NormalizedWaveform(buckets);
        }

        NormalizedWaveform(samples[..n.min(self.config.length)].to_vec())
    }
}

/// Normalize with the default length (70) and fill threshold (30)
pub fn normalize(samples: &[f32]) -> NormalizedWaveform {
    WaveformNormalizer::default().normalize(samples)
}
