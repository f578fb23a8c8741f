use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::metering;

pub struct AudioFile {
    pub path: String,
    pub duration_millis: u64,
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening audio file: {}", path.display());

        let reader = WavReader::open(path).context("Failed to open WAV file")?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")?;

        let frames = samples.len() as u64 / u64::from(spec.channels.max(1));
        let duration_millis = frames * 1000 / u64::from(spec.sample_rate.max(1));

        info!(
            "Audio file loaded: {}ms, {}Hz, {} channels, {} samples",
            duration_millis,
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        Ok(Self {
            path: path.display().to_string(),
            duration_millis,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        })
    }

    /// Loudness of each consecutive `interval` of audio, in dBFS
    pub fn metering_levels(&self, interval: Duration) -> Vec<f32> {
        let frames_per_window =
            (u128::from(self.sample_rate) * interval.as_micros() / 1_000_000) as usize;
        let window_len = frames_per_window.max(1) * usize::from(self.channels.max(1));
        metering::window_levels(&self.samples, window_len)
    }
}
