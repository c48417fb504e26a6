use std::collections::HashMap;
use std::time::Instant;

use crate::shared::orientation::Orientation;

/// Observer for frame-analysis events.
///
/// Keeps the analyzer free of any particular output mechanism; the CLI
/// summarises through `log`, embedders and tests plug in the null logger.
pub trait AnalysisLogger: Send {
    /// Record how long a named analysis stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. skin sample count).
    fn metric(&mut self, name: &str, value: f64);

    /// Record the smoothed orientation reported for a frame.
    fn outcome(&mut self, orientation: Orientation);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullAnalysisLogger;

impl AnalysisLogger for NullAnalysisLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn outcome(&mut self, _orientation: Orientation) {}
}

/// Accumulates stage timings, metrics, and orientation counts and reports
/// them through `log` when the run ends.
pub struct SummaryAnalysisLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    outcomes: [usize; 4],
    start_time: Instant,
}

impl SummaryAnalysisLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            outcomes: [0; 4],
            start_time: Instant::now(),
        }
    }

    pub fn frames(&self) -> usize {
        self.outcomes.iter().sum()
    }

    pub fn outcome_count(&self, orientation: Orientation) -> usize {
        self.outcomes[orientation.index()]
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    /// Returns the formatted summary, or `None` if no frame was recorded.
    pub fn summary_string(&self) -> Option<String> {
        let frames = self.frames();
        if frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Analysis summary ({frames} frames, {:.1}s wall time):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  max {:6.2}ms",
                average(durations),
                durations.iter().copied().fold(0.0, f64::max)
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", average(&self.metrics[name])));
        }

        for orientation in Orientation::ALL {
            let count = self.outcome_count(orientation);
            let pct = count as f64 / frames as f64 * 100.0;
            lines.push(format!("  {orientation:8}: {count} ({pct:.1}%)"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for SummaryAnalysisLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl AnalysisLogger for SummaryAnalysisLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn outcome(&mut self, orientation: Orientation) {
        self.outcomes[orientation.index()] += 1;
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
