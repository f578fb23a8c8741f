use anyhow::{ensure, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::audio::{CaptureConfig, PlayerConfig, QualityPreset};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recording: RecordingConfig,
    pub playback: PlaybackConfig,
    pub waveform: WaveformConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    pub preset: QualityPreset,
    /// How often the capture stream reports a metering sample
    pub metering_interval_ms: u64,
    /// Value recorded when a metering report carries no reading
    pub missing_sample_db: f32,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            preset: QualityPreset::High,
            metering_interval_ms: 100,
            missing_sample_db: -100.0,
        }
    }
}

impl RecordingConfig {
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            preset: self.preset,
            metering_interval: Duration::from_millis(self.metering_interval_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub progress_updates_per_second: u32,
    /// Fraction of the track width the progress indicator may travel
    pub progress_scale: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            progress_updates_per_second: 60,
            progress_scale: 0.95,
        }
    }
}

impl PlaybackConfig {
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            progress_interval: Duration::from_micros(
                1_000_000 / u64::from(self.progress_updates_per_second.max(1)),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Maximum number of buckets kept from a recording
    pub length: usize,
    /// Recordings shorter than this are padded up to it
    pub fill_threshold: usize,
    pub padding_db: f32,
    pub bar_floor_db: f32,
    pub bar_min_height: f32,
    pub bar_max_height: f32,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            length: 70,
            fill_threshold: 30,
            padding_db: -55.0,
            bar_floor_db: -60.0,
            bar_min_height: 5.0,
            bar_max_height: 40.0,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("VOICE_MEMOS").separator("__"))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let waveform = &self.waveform;
        ensure!(waveform.length > 0, "waveform.length must be positive");
        ensure!(
            waveform.fill_threshold <= waveform.length,
            "waveform.fill_threshold ({}) exceeds waveform.length ({})",
            waveform.fill_threshold,
            waveform.length
        );
        ensure!(
            waveform.bar_floor_db < 0.0,
            "waveform.bar_floor_db must be below 0 dB"
        );
        ensure!(
            self.recording.metering_interval_ms > 0,
            "recording.metering_interval_ms must be positive"
        );
        ensure!(
            self.playback.progress_updates_per_second > 0,
            "playback.progress_updates_per_second must be positive"
        );
        ensure!(
            self.playback.progress_scale > 0.0 && self.playback.progress_scale <= 1.0,
            "playback.progress_scale must be in (0, 1]"
        );
        Ok(())
    }
}
