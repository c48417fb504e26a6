use std::path::Path;
use std::time::{Duration, Instant};

use crate::pipeline::detection_history::DetectionHistory;
use crate::pipeline::frame_analyzer::{FrameAnalysis, FrameAnalyzer};
use crate::shared::detection::Detection;
use crate::shared::orientation::Orientation;
use crate::shared::sequence_metadata::SequenceMetadata;
use crate::video::domain::frame_source::FrameSource;

/// Per-frame callback: `(analysis, frames_done, total_frames)`. Returning
/// `false` cancels the run.
pub type FrameCallback = Box<dyn FnMut(&FrameAnalysis, usize, usize) -> bool + Send>;

/// Outcome of analysing a whole sequence.
#[derive(Debug, Clone)]
pub struct SequenceReport {
    pub metadata: SequenceMetadata,
    pub frames: usize,
    counts: [usize; 4],
    /// Most recent smoothed detections, newest first.
    pub history: Vec<Detection>,
}

impl SequenceReport {
    pub fn count(&self, orientation: Orientation) -> usize {
        self.counts[orientation.index()]
    }

    /// Frames whose smoothed orientation was a face direction.
    pub fn face_frames(&self) -> usize {
        Orientation::ALL
            .into_iter()
            .filter(|o| o.is_face())
            .map(|o| self.count(o))
            .sum()
    }
}

/// Runs a recorded frame sequence through a [`FrameAnalyzer`].
///
/// Frames are stamped at `start + interval * n` rather than wall-clock time,
/// so smoothing behaves as it would have at capture rate no matter how fast
/// the frames decode.
pub struct AnalyzeSequenceUseCase {
    source: Box<dyn FrameSource>,
    analyzer: FrameAnalyzer,
    history: DetectionHistory,
    on_frame: Option<FrameCallback>,
}

impl AnalyzeSequenceUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        analyzer: FrameAnalyzer,
        history: DetectionHistory,
        on_frame: Option<FrameCallback>,
    ) -> Self {
        Self {
            source,
            analyzer,
            history,
            on_frame,
        }
    }

    pub fn history(&self) -> &DetectionHistory {
        &self.history
    }

    pub fn execute(
        &mut self,
        path: &Path,
        interval: Duration,
    ) -> Result<SequenceReport, Box<dyn std::error::Error>> {
        let metadata = self.source.open(path)?;
        let result = self.run(metadata, interval);
        self.source.close();
        self.analyzer.log_summary();
        result
    }

    fn run(
        &mut self,
        metadata: SequenceMetadata,
        interval: Duration,
    ) -> Result<SequenceReport, Box<dyn std::error::Error>> {
        self.analyzer.reset();
        self.history.clear();

        let total = metadata.total_frames;
        let start = Instant::now();
        let mut counts = [0usize; 4];
        let mut frames = 0usize;

        for frame in self.source.frames() {
            let frame = frame?;
            let now = start + interval * frames as u32;
            let analysis = self.analyzer.analyze(&frame, now);

            self.history.push(analysis.detection);
            counts[analysis.detection.orientation.index()] += 1;
            frames += 1;

            if let Some(callback) = self.on_frame.as_mut() {
                if !callback(&analysis, frames, total) {
                    return Err("Cancelled".into());
                }
            }
        }

        Ok(SequenceReport {
            metadata,
            frames,
            counts,
            history: self.history.iter().copied().collect(),
        })
    }
}
