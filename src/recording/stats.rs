use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about the current recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingStats {
    /// Whether recording is currently active
    pub is_recording: bool,

    /// When the recording started, if one is active
    pub started_at: Option<DateTime<Utc>>,

    /// Wall-clock time since the recording started, in seconds
    pub elapsed_secs: f64,

    /// Number of metering samples collected so far
    pub samples_count: usize,
}
