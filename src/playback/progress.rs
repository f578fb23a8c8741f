/// Playback position as a fraction of the track, scaled for rendering
///
/// The scale (0.95 by default) keeps the indicator off the far edge of its
/// track; the fraction always lies in `[0, scale]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct PlaybackProgress(f32);

impl PlaybackProgress {
    pub const ZERO: PlaybackProgress = PlaybackProgress(0.0);
    pub const DEFAULT_SCALE: f32 = 0.95;

    /// Bring a scale into `(0, 1]`; NaN and non-positive values fall back to the default
    pub fn usable_scale(scale: f32) -> f32 {
        if scale.is_nan() || scale <= 0.0 {
            Self::DEFAULT_SCALE
        } else {
            scale.min(1.0)
        }
    }

    /// Progress for `position_millis` within `duration_millis` (a zero duration counts as 1ms)
    pub fn from_position(position_millis: u64, duration_millis: u64, scale: f32) -> Self {
        let scale = Self::usable_scale(scale);
        let duration = duration_millis.max(1) as f64;
        let fraction = (position_millis as f64 / duration) * f64::from(scale);
        Self((fraction as f32).clamp(0.0, scale))
    }

    pub fn fraction(&self) -> f32 {
        self.0
    }

    /// The fraction as a percentage of the track width
    pub fn percent(&self) -> f32 {
        self.0 * 100.0
    }
}

/// Format milliseconds as `MM:SS`, rounding down to whole seconds
pub fn format_clock(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
