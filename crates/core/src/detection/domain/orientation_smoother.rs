use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::shared::analyzer_config::AnalyzerConfig;
use crate::shared::constants::{SMOOTHING_DECAY_MS, SMOOTHING_WINDOW_MS};
use crate::shared::detection::Detection;
use crate::shared::orientation::Orientation;

/// Domain interface for temporal smoothing of per-frame orientation verdicts.
pub trait OrientationSmootherInterface: Send {
    /// Folds `detection` into the window and returns the consensus as of `now`.
    fn fold(&mut self, detection: Detection, now: Instant) -> Detection;

    /// Drops all history, as when a new stream starts.
    fn reset(&mut self);
}

/// Recency-weighted vote over a short rolling window.
///
/// Each entry votes for its orientation with `exp(-age / decay) * confidence`.
/// The winner's score is normalised by the summed weights of every entry, so
/// a lone strong detection reports its own confidence and a split window
/// reports less. Ties go to the earlier variant in [`Orientation::ALL`].
///
/// A window whose entries all carry zero confidence scores every variant at
/// zero, so it reports `Straight` with confidence 0 whatever orientations it
/// was fed.
pub struct OrientationSmoother {
    window: Duration,
    decay_ms: f64,
    entries: VecDeque<Detection>,
}

impl OrientationSmoother {
    pub fn new(window: Duration, decay_ms: f64) -> Self {
        Self {
            window,
            decay_ms,
            entries: VecDeque::with_capacity(8),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.window(), config.decay_ms)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry at least `window` old. Callers may fold detections
    /// out of timestamp order, so the whole window is scanned.
    fn evict(&mut self, now: Instant) {
        let window = self.window;
        self.entries.retain(|e| now.saturating_duration_since(e.timestamp) < window);
    }

    fn weight(&self, entry: &Detection, now: Instant) -> f64 {
        let age_ms = now.saturating_duration_since(entry.timestamp).as_secs_f64() * 1000.0;
        (-age_ms / self.decay_ms).exp()
    }

    fn consensus(&self, now: Instant) -> Detection {
        let mut scores = [0.0f64; 4];
        let mut total_weight = 0.0;
        for entry in &self.entries {
            let w = self.weight(entry, now);
            scores[entry.orientation.index()] += w * entry.confidence;
            total_weight += w;
        }

        let mut winner = Orientation::ALL[0];
        for candidate in Orientation::ALL.into_iter().skip(1) {
            if scores[candidate.index()] > scores[winner.index()] {
                winner = candidate;
            }
        }

        let confidence = if total_weight > 0.0 {
            (scores[winner.index()] / total_weight).min(1.0)
        } else {
            0.0
        };
        Detection::new(winner, confidence, now)
    }
}

impl Default for OrientationSmoother {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(SMOOTHING_WINDOW_MS),
            SMOOTHING_DECAY_MS,
        )
    }
}

impl OrientationSmootherInterface for OrientationSmoother {
    fn fold(&mut self, detection: Detection, now: Instant) -> Detection {
        self.entries.push_back(detection);
        self.evict(now);
        self.consensus(now)
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}
