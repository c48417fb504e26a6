//! Head-turn inference from left/right asymmetry of a skin region.
//!
//! Pixels are split into three vertical bands around the region centroid.
//! A frontal face spreads skin evenly on both sides; a turned face piles it
//! up on one side. Density (sample counts) and mean skin score are compared
//! between the outer bands and averaged into one asymmetry score.

use crate::shared::analyzer_config::AnalyzerConfig;
use crate::shared::constants::{CENTER_BAND_HALF_WIDTH, STRAIGHT_THRESHOLD, TURN_THRESHOLD};
use crate::shared::orientation::Orientation;
use crate::shared::region::FaceRegion;

/// Per-band statistics behind an orientation verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asymmetry {
    pub left_count: usize,
    pub right_count: usize,
    pub center_count: usize,
    pub left_mean_intensity: f64,
    pub right_mean_intensity: f64,
    pub density_ratio: f64,
    pub intensity_ratio: f64,
    pub score: f64,
}

impl Asymmetry {
    pub fn measure(region: &FaceRegion<'_>, band_half_width: f64) -> Self {
        let mut left_count = 0usize;
        let mut right_count = 0usize;
        let mut center_count = 0usize;
        let mut left_sum = 0.0;
        let mut right_sum = 0.0;

        for p in region.pixels {
            let x = p.x as f64;
            if x < region.center_x - band_half_width {
                left_count += 1;
                left_sum += p.intensity;
            } else if x > region.center_x + band_half_width {
                right_count += 1;
                right_sum += p.intensity;
            } else {
                center_count += 1;
            }
        }

        let left_mean_intensity = mean(left_sum, left_count);
        let right_mean_intensity = mean(right_sum, right_count);
        let density_ratio = ratio(
            left_count.abs_diff(right_count) as f64,
            (left_count + right_count) as f64,
        );
        let intensity_ratio = ratio(
            (left_mean_intensity - right_mean_intensity).abs(),
            left_mean_intensity + right_mean_intensity,
        );

        Self {
            left_count,
            right_count,
            center_count,
            left_mean_intensity,
            right_mean_intensity,
            density_ratio,
            intensity_ratio,
            score: (density_ratio + intensity_ratio) / 2.0,
        }
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Classifies a face region as straight, left, or right.
///
/// The label is mirrored: more skin on the image's left side means the
/// subject is presenting their right profile, so the verdict is `Right`.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    band_half_width: f64,
    straight_threshold: f64,
    turn_threshold: f64,
}

impl OrientationEstimator {
    pub fn new(band_half_width: f64, straight_threshold: f64, turn_threshold: f64) -> Self {
        Self {
            band_half_width,
            straight_threshold,
            turn_threshold,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            config.center_band_half_width,
            config.straight_threshold,
            config.turn_threshold,
        )
    }

    pub fn estimate(&self, region: &FaceRegion<'_>) -> (Orientation, f64) {
        let asymmetry = Asymmetry::measure(region, self.band_half_width);
        let orientation = self.classify(&asymmetry);
        log::debug!(
            "asymmetry {:.3} (density {:.3}, intensity {:.3}; L={} C={} R={}) -> {orientation}",
            asymmetry.score,
            asymmetry.density_ratio,
            asymmetry.intensity_ratio,
            asymmetry.left_count,
            asymmetry.center_count,
            asymmetry.right_count,
        );
        (orientation, region.confidence.min(1.0))
    }

    pub fn classify(&self, asymmetry: &Asymmetry) -> Orientation {
        let larger_side = asymmetry.left_count.max(asymmetry.right_count) as f64;
        if asymmetry.score < self.straight_threshold
            && asymmetry.center_count as f64 > larger_side / 2.0
        {
            Orientation::Straight
        } else if asymmetry.score > self.turn_threshold {
            if asymmetry.left_count > asymmetry.right_count {
                Orientation::Right
            } else {
                Orientation::Left
            }
        } else {
            // Dead zone between the thresholds: do not report a turn.
            Orientation::Straight
        }
    }
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::new(CENTER_BAND_HALF_WIDTH, STRAIGHT_THRESHOLD, TURN_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::region::PixelSample;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn samples(xs: &[(u32, usize, f64)]) -> Vec<PixelSample> {
        // (x, repeat, intensity)
        xs.iter()
            .flat_map(|&(x, n, intensity)| {
                (0..n).map(move |y| PixelSample {
                    x,
                    y: y as u32,
                    intensity,
                })
            })
            .collect()
    }

    fn region(center_x: f64, confidence: f64, pixels: &[PixelSample]) -> FaceRegion<'_> {
        FaceRegion {
            center_x,
            center_y: 50.0,
            width: 100.0,
            height: 100.0,
            confidence,
            pixels,
        }
    }

    #[test]
    fn test_balanced_sides_are_straight() {
        let pixels = samples(&[(10, 20, 0.9), (50, 30, 0.9), (90, 20, 0.9)]);
        let r = region(50.0, 0.8, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        assert_relative_eq!(a.score, 0.0);
        assert_eq!(OrientationEstimator::default().estimate(&r), (Orientation::Straight, 0.8));
    }

    #[test]
    fn test_balanced_sides_without_center_still_straight() {
        // asymmetry 0 but empty center band: falls through to the dead-zone default
        let pixels = samples(&[(10, 20, 0.9), (90, 20, 0.9)]);
        let r = region(50.0, 0.8, &pixels);
        assert_eq!(OrientationEstimator::default().estimate(&r).0, Orientation::Straight);
    }

    #[test]
    fn test_denser_left_side_is_right_turn() {
        let pixels = samples(&[(10, 40, 0.9), (50, 10, 0.9), (90, 5, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        // density (40-5)/45, intensity 0
        assert_relative_eq!(a.density_ratio, 35.0 / 45.0, epsilon = 1e-12);
        assert_relative_eq!(a.intensity_ratio, 0.0, epsilon = 1e-12);
        assert_eq!(OrientationEstimator::default().estimate(&r).0, Orientation::Right);
    }

    #[test]
    fn test_denser_right_side_is_left_turn() {
        let pixels = samples(&[(10, 5, 0.9), (50, 10, 0.9), (90, 40, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        assert_eq!(OrientationEstimator::default().estimate(&r).0, Orientation::Left);
    }

    #[test]
    fn test_intensity_difference_contributes() {
        // Equal counts, 0.9 vs 0.7 mean score: intensity ratio 0.2 / 1.6
        let pixels = samples(&[(10, 10, 0.9), (50, 10, 0.8), (90, 10, 0.7)]);
        let r = region(50.0, 1.0, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        assert_relative_eq!(a.density_ratio, 0.0);
        assert_relative_eq!(a.intensity_ratio, 0.125, epsilon = 1e-12);
        assert_relative_eq!(a.score, 0.0625, epsilon = 1e-12);
    }

    #[test]
    fn test_only_center_pixels_guards_division() {
        let pixels = samples(&[(50, 60, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        assert_eq!((a.left_count, a.right_count), (0, 0));
        assert_relative_eq!(a.left_mean_intensity, 0.0);
        assert_relative_eq!(a.density_ratio, 0.0);
        assert_relative_eq!(a.intensity_ratio, 0.0);
        assert!(a.score.is_finite());
        assert_eq!(OrientationEstimator::default().estimate(&r).0, Orientation::Straight);
    }

    #[test]
    fn test_one_empty_side_is_full_asymmetry() {
        let pixels = samples(&[(10, 10, 0.9), (50, 10, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        assert_relative_eq!(a.score, 1.0);
        assert_eq!(OrientationEstimator::default().classify(&a), Orientation::Right);
    }

    #[test]
    fn test_band_edges_belong_to_center() {
        let pixels = samples(&[(30, 1, 0.9), (70, 1, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        let a = Asymmetry::measure(&r, 20.0);
        assert_eq!(a.center_count, 2);
    }

    #[rstest]
    #[case::below_straight(0.10, Orientation::Straight)]
    #[case::dead_zone_low(0.15, Orientation::Straight)]
    #[case::dead_zone_mid(0.20, Orientation::Straight)]
    #[case::dead_zone_high(0.25, Orientation::Straight)]
    #[case::turn(0.26, Orientation::Right)]
    fn test_classify_thresholds(#[case] score: f64, #[case] expected: Orientation) {
        let a = Asymmetry {
            left_count: 30,
            right_count: 20,
            center_count: 40,
            left_mean_intensity: 0.9,
            right_mean_intensity: 0.9,
            density_ratio: score,
            intensity_ratio: score,
            score,
        };
        assert_eq!(OrientationEstimator::default().classify(&a), expected);
    }

    #[test]
    fn test_confidence_capped_at_one() {
        let pixels = samples(&[(50, 10, 0.9)]);
        let r = region(50.0, 1.7, &pixels);
        assert_relative_eq!(OrientationEstimator::default().estimate(&r).1, 1.0);
    }

    #[test]
    fn test_from_config_uses_band_width() {
        let config = AnalyzerConfig {
            center_band_half_width: 5.0,
            ..Default::default()
        };
        let pixels = samples(&[(40, 10, 0.9), (50, 10, 0.9)]);
        let r = region(50.0, 1.0, &pixels);
        // x=40 is outside a 5px band, so the left side is populated
        assert_eq!(
            OrientationEstimator::from_config(&config).estimate(&r).0,
            Orientation::Right
        );
    }
}
