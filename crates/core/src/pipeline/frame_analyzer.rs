use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::orientation_estimator::OrientationEstimator;
use crate::detection::domain::orientation_smoother::{
    OrientationSmoother, OrientationSmootherInterface,
};
use crate::detection::infrastructure::color_space_skin_classifier::ColorSpaceSkinClassifier;
use crate::detection::infrastructure::skin_region_detector::SkinRegionDetector;
use crate::pipeline::analysis_logger::{AnalysisLogger, NullAnalysisLogger};
use crate::shared::analyzer_config::AnalyzerConfig;
use crate::shared::detection::Detection;
use crate::shared::frame::{Frame, FrameError};
use crate::shared::orientation::Orientation;
use crate::shared::region::RegionGeometry;

/// Result of analysing one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnalysis {
    /// Smoothed orientation, or `None`/0 when no face region was found.
    pub detection: Detection,
    /// Face-region geometry for overlays; absent when no region was found.
    pub geometry: Option<RegionGeometry>,
}

/// Per-stream analysis pipeline: detect region → estimate → smooth.
///
/// Owns the stream's smoothing state, so each concurrent stream needs its
/// own analyzer. Frames where no region is found report `None` without
/// entering the smoothing window.
pub struct FrameAnalyzer {
    detector: Box<dyn FaceDetector>,
    estimator: OrientationEstimator,
    smoother: Box<dyn OrientationSmootherInterface>,
    logger: Box<dyn AnalysisLogger>,
}

impl FrameAnalyzer {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        estimator: OrientationEstimator,
        smoother: Box<dyn OrientationSmootherInterface>,
    ) -> Self {
        Self {
            detector,
            estimator,
            smoother,
            logger: Box::new(NullAnalysisLogger),
        }
    }

    /// Wires the color-space skin detector and default smoother from `config`.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            Box::new(SkinRegionDetector::new(
                Box::new(ColorSpaceSkinClassifier::new()),
                config,
            )),
            OrientationEstimator::from_config(config),
            Box::new(OrientationSmoother::from_config(config)),
        )
    }

    pub fn with_logger(mut self, logger: Box<dyn AnalysisLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn analyze(&mut self, frame: &Frame, now: Instant) -> FrameAnalysis {
        let started = Instant::now();
        let region = self.detector.detect(frame);
        self.logger.timing("detect", elapsed_ms(started));

        let Some(region) = region else {
            if let Some(count) = self.detector.sample_count() {
                self.logger.metric("skin_samples", count as f64);
            }
            self.logger.outcome(Orientation::None);
            return FrameAnalysis {
                detection: Detection::none(now),
                geometry: None,
            };
        };
        self.logger.metric("skin_samples", region.pixels.len() as f64);

        let started = Instant::now();
        let (orientation, confidence) = self.estimator.estimate(&region);
        self.logger.timing("estimate", elapsed_ms(started));
        let geometry = region.geometry();

        let started = Instant::now();
        let smoothed = self
            .smoother
            .fold(Detection::new(orientation, confidence, now), now);
        self.logger.timing("smooth", elapsed_ms(started));
        self.logger.outcome(smoothed.orientation);

        log::debug!(
            "frame {}: raw {orientation} ({confidence:.2}) -> smoothed {} ({:.2})",
            frame.index(),
            smoothed.orientation,
            smoothed.confidence
        );

        FrameAnalysis {
            detection: smoothed,
            geometry: Some(geometry),
        }
    }

    /// Validates a raw RGB/RGBA buffer and analyses it.
    pub fn analyze_buffer(
        &mut self,
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        now: Instant,
    ) -> Result<FrameAnalysis, FrameError> {
        let frame = Frame::new(data, width, height, channels, 0)?;
        Ok(self.analyze(&frame, now))
    }

    /// Clears smoothing state, as when the stream restarts.
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    pub fn log_summary(&self) {
        self.logger.summary();
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
