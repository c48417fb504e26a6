/// Sample every Nth pixel along both axes.
pub const SAMPLE_STRIDE: u32 = 2;

/// A sample counts as skin when its score is strictly above this.
pub const MIN_SKIN_SCORE: f64 = 0.3;

/// Fewer qualifying samples than this means no region.
pub const MIN_SKIN_SAMPLES: usize = 50;

/// Sample count at which region confidence stops growing with population.
pub const CONFIDENCE_SATURATION_SAMPLES: f64 = 200.0;

/// Half-width (pixels) of the center band around the region centroid.
pub const CENTER_BAND_HALF_WIDTH: f64 = 20.0;

/// Asymmetry below this (with a populated center band) reads as straight.
pub const STRAIGHT_THRESHOLD: f64 = 0.15;

/// Asymmetry above this reads as a head turn.
pub const TURN_THRESHOLD: f64 = 0.25;

/// Rolling window length for temporal smoothing, in milliseconds.
pub const SMOOTHING_WINDOW_MS: u64 = 500;

/// Exponential recency decay constant, in milliseconds.
pub const SMOOTHING_DECAY_MS: f64 = 200.0;

/// Default number of smoothed detections kept for display.
pub const HISTORY_CAPACITY: usize = 10;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
