//! Loudness metering of PCM windows in dBFS

/// Quietest level a metering window reports
pub const SILENCE_FLOOR_DB: f32 = -100.0;

/// RMS level of 16-bit PCM samples in dBFS, floored at `SILENCE_FLOOR_DB`
pub fn level_db(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return SILENCE_FLOOR_DB;
    }

    let sum_sq: f64 = samples
        .iter()
        .map(|&s| {
            let normalized = f64::from(s) / f64::from(i16::MAX);
            normalized * normalized
        })
        .sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();

    if rms <= 0.0 {
        return SILENCE_FLOOR_DB;
    }

    ((20.0 * rms.log10()) as f32).clamp(SILENCE_FLOOR_DB, 0.0)
}

/// Split interleaved PCM into consecutive windows and meter each one
///
/// A trailing partial window is metered as well.
pub fn window_levels(samples: &[i16], window_len: usize) -> Vec<f32> {
    if window_len == 0 {
        return Vec::new();
    }
    samples.chunks(window_len).map(level_db).collect()
}
