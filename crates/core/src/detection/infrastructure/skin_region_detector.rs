use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::skin_classifier::SkinClassifier;
use crate::shared::analyzer_config::AnalyzerConfig;
use crate::shared::frame::Frame;
use crate::shared::region::{FaceRegion, PixelSample};

/// Finds the dominant skin-colored region by sparse pixel sampling.
///
/// Every `stride`-th pixel on both axes is scored; samples above
/// `min_score` are collected and reduced to one centroid/extent summary.
/// Too small a population yields no region. Multiple faces collapse into a
/// single region.
///
/// The sample buffer is kept between frames so steady-state analysis does
/// not allocate.
pub struct SkinRegionDetector {
    classifier: Box<dyn SkinClassifier>,
    stride: usize,
    min_score: f64,
    min_samples: usize,
    saturation_samples: f64,
    samples: Vec<PixelSample>,
}

impl SkinRegionDetector {
    pub fn new(classifier: Box<dyn SkinClassifier>, config: &AnalyzerConfig) -> Self {
        Self {
            classifier,
            stride: config.sample_stride.max(1) as usize,
            min_score: config.min_skin_score,
            min_samples: config.min_skin_samples,
            saturation_samples: config.confidence_saturation_samples,
            samples: Vec::new(),
        }
    }

    fn collect_samples(&mut self, frame: &Frame) {
        self.samples.clear();
        if frame.is_empty() {
            return;
        }

        let pixels = frame.as_ndarray();
        let (height, width, _) = pixels.dim();
        for y in (0..height).step_by(self.stride) {
            for x in (0..width).step_by(self.stride) {
                let intensity = self.classifier.score(
                    pixels[[y, x, 0]],
                    pixels[[y, x, 1]],
                    pixels[[y, x, 2]],
                );
                if intensity > self.min_score {
                    self.samples.push(PixelSample {
                        x: x as u32,
                        y: y as u32,
                        intensity,
                    });
                }
            }
        }
    }
}

impl FaceDetector for SkinRegionDetector {
    fn detect(&mut self, frame: &Frame) -> Option<FaceRegion<'_>> {
        self.collect_samples(frame);

        let count = self.samples.len();
        if count < self.min_samples {
            log::debug!(
                "frame {}: {count} skin samples, below minimum {}",
                frame.index(),
                self.min_samples
            );
            return None;
        }

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_intensity = 0.0;
        let (mut min_x, mut max_x) = (u32::MAX, 0u32);
        let (mut min_y, mut max_y) = (u32::MAX, 0u32);
        for s in &self.samples {
            sum_x += s.x as f64;
            sum_y += s.y as f64;
            sum_intensity += s.intensity;
            min_x = min_x.min(s.x);
            max_x = max_x.max(s.x);
            min_y = min_y.min(s.y);
            max_y = max_y.max(s.y);
        }

        let n = count as f64;
        let mean_intensity = sum_intensity / n;
        let confidence = (mean_intensity * (n / self.saturation_samples)).min(1.0);

        Some(FaceRegion {
            center_x: sum_x / n,
            center_y: sum_y / n,
            width: (max_x - min_x) as f64,
            height: (max_y - min_y) as f64,
            confidence,
            pixels: &self.samples,
        })
    }

    fn sample_count(&self) -> Option<usize> {
        Some(self.samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::infrastructure::color_space_skin_classifier::ColorSpaceSkinClassifier;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SKIN: [u8; 3] = [200, 150, 120];
    const BACKGROUND: [u8; 3] = [30, 30, 30];

    fn detector() -> SkinRegionDetector {
        SkinRegionDetector::new(
            Box::new(ColorSpaceSkinClassifier::new()),
            &AnalyzerConfig::default(),
        )
    }

    /// Solid background with one skin rectangle `[x0, x1) x [y0, y1)`.
    fn frame_with_block(w: u32, h: u32, x0: u32, x1: u32, y0: u32, y1: u32) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                let inside = (x0..x1).contains(&x) && (y0..y1).contains(&y);
                data.extend_from_slice(if inside { &SKIN } else { &BACKGROUND });
            }
        }
        Frame::new(data, w, h, 3, 0).unwrap()
    }

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
        Frame::new(rgb.repeat((w * h) as usize), w, h, 3, 0).unwrap()
    }

    #[rstest]
    #[case::black([0, 0, 0])]
    #[case::white([255, 255, 255])]
    #[case::background(BACKGROUND)]
    fn test_uniform_non_skin_frame_has_no_region(#[case] rgb: [u8; 3]) {
        assert!(detector().detect(&solid(100, 100, rgb)).is_none());
    }

    #[test]
    fn test_empty_frame_has_no_region() {
        let frame = Frame::new(Vec::new(), 0, 0, 3, 0).unwrap();
        assert!(detector().detect(&frame).is_none());
    }

    #[test]
    fn test_population_below_minimum_has_no_region() {
        // 14x14 block at stride 2 -> 7*7 = 49 samples
        let frame = frame_with_block(100, 100, 20, 34, 20, 34);
        let mut d = detector();
        assert!(d.detect(&frame).is_none());
        assert_eq!(d.sample_count(), Some(49));
    }

    #[test]
    fn test_population_at_minimum_yields_region() {
        // 20x10 block -> 10*5 = 50 samples
        let frame = frame_with_block(100, 100, 20, 40, 20, 30);
        let mut d = detector();
        let region = d.detect(&frame).unwrap();
        assert_eq!(region.pixels.len(), 50);
    }

    #[test]
    fn test_block_region_geometry_and_confidence() {
        // 40x40 block at x 10..50, y 30..70 -> samples x,y in {10,12,..,48}/{30,..,68}
        let frame = frame_with_block(100, 100, 10, 50, 30, 70);
        let mut d = detector();
        let region = d.detect(&frame).unwrap();
        assert_eq!(region.pixels.len(), 400);
        assert_relative_eq!(region.center_x, 29.0, epsilon = 1e-9);
        assert_relative_eq!(region.center_y, 49.0, epsilon = 1e-9);
        assert_relative_eq!(region.width, 38.0);
        assert_relative_eq!(region.height, 38.0);
        // 0.9 * 400 / 200 saturates at 1
        assert_relative_eq!(region.confidence, 1.0);
        assert!(region.pixels.iter().all(|p| p.intensity > 0.3));
    }

    #[test]
    fn test_confidence_scales_with_population() {
        // 20x20 block -> 100 samples at 0.9 -> 0.9 * 100 / 200
        let frame = frame_with_block(100, 100, 0, 20, 0, 20);
        let mut d = detector();
        let region = d.detect(&frame).unwrap();
        assert_eq!(region.pixels.len(), 100);
        assert_relative_eq!(region.confidence, 0.45, epsilon = 1e-9);
    }

    #[test]
    fn test_rgba_frame_ignores_alpha() {
        let mut data = Vec::new();
        for _ in 0..(40 * 40) {
            data.extend_from_slice(&[200, 150, 120, 0]);
        }
        let frame = Frame::new(data, 40, 40, 4, 0).unwrap();
        let mut d = detector();
        assert_eq!(d.detect(&frame).unwrap().pixels.len(), 400);
    }

    #[test]
    fn test_custom_stride_changes_sample_count() {
        let config = AnalyzerConfig {
            sample_stride: 1,
            ..Default::default()
        };
        let mut d = SkinRegionDetector::new(Box::new(ColorSpaceSkinClassifier), &config);
        let frame = frame_with_block(100, 100, 0, 20, 0, 20);
        assert_eq!(d.detect(&frame).unwrap().pixels.len(), 400);
    }

    #[test]
    fn test_sample_buffer_is_reset_between_frames() {
        let mut d = detector();
        let big = frame_with_block(100, 100, 0, 60, 0, 60);
        assert!(d.detect(&big).is_some());
        assert!(d.detect(&solid(100, 100, BACKGROUND)).is_none());
        let small = frame_with_block(100, 100, 0, 20, 0, 20);
        assert_eq!(d.detect(&small).unwrap().pixels.len(), 100);
    }
}
