use crate::detection::domain::skin_classifier::SkinClassifier;

use super::color_space::{rgb_to_hsv, rgb_to_ycbcr};

const RGB_RULE_SCORE: f64 = 0.8;
const YCBCR_RULE_SCORE: f64 = 0.9;
const HSV_RULE_SCORE: f64 = 0.7;

/// Skin classifier combining three fixed color-space rules.
///
/// Each rule fires independently with its own score and the strongest one
/// wins, so a pixel missed under one lighting model can still be caught by
/// another. No rule firing scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSpaceSkinClassifier;

impl ColorSpaceSkinClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SkinClassifier for ColorSpaceSkinClassifier {
    fn score(&self, r: u8, g: u8, b: u8) -> f64 {
        rgb_rule(r, g, b)
            .max(ycbcr_rule(r, g, b))
            .max(hsv_rule(r, g, b))
    }
}

fn rgb_rule(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let fires = r > 95
        && g > 40
        && b > 20
        && max - min > 15
        && r.abs_diff(g) > 15
        && r > g
        && r > b;
    if fires {
        RGB_RULE_SCORE
    } else {
        0.0
    }
}

fn ycbcr_rule(r: u8, g: u8, b: u8) -> f64 {
    let (y, cb, cr) = rgb_to_ycbcr(r, g, b);
    if y > 80.0 && (77.0..=127.0).contains(&cb) && (133.0..=173.0).contains(&cr) {
        YCBCR_RULE_SCORE
    } else {
        0.0
    }
}

fn hsv_rule(r: u8, g: u8, b: u8) -> f64 {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    if (0.0..=50.0).contains(&h) && (0.23..=0.68).contains(&s) && (0.35..=0.95).contains(&v) {
        HSV_RULE_SCORE
    } else {
        0.0
    }
}
