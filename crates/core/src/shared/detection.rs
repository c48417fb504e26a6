use std::time::Instant;

use super::orientation::Orientation;

/// One orientation verdict at a point in time.
///
/// Used both for the raw per-frame estimate fed into the smoother and for
/// the smoothed result handed back to callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub orientation: Orientation,
    pub confidence: f64,
    pub timestamp: Instant,
}

impl Detection {
    pub fn new(orientation: Orientation, confidence: f64, timestamp: Instant) -> Self {
        Self {
            orientation,
            confidence,
            timestamp,
        }
    }

    /// The "no face" result: orientation `None` with zero confidence.
    pub fn none(timestamp: Instant) -> Self {
        Self::new(Orientation::None, 0.0, timestamp)
    }
}
