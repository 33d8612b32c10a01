//! Time representation for the timeline.
//!
//! All timeline positions are seconds as `f64`. The playhead advances by
//! measured wall-clock deltas, so sub-frame precision is expected.

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, start + duration)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the range
    pub start: f64,
    /// Duration of the range
    pub duration: f64,
}

impl TimeRange {
    /// Create a new time range from start and duration.
    #[inline]
    pub const fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check if a time is within this range.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }
}

/// Format a playhead position as `MM:SS`.
///
/// Minutes wrap at one hour, matching the transport display. Negative and
/// non-finite inputs render as `00:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}
