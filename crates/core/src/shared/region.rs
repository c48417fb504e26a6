/// A sampled frame coordinate with its skin-color score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub intensity: f64,
}

/// Coarse face-region estimate for a single frame.
///
/// Borrows the detector's sample buffer, so it lives no longer than the
/// analysis pass that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRegion<'a> {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
    pub pixels: &'a [PixelSample],
}

impl FaceRegion<'_> {
    pub fn geometry(&self) -> RegionGeometry {
        RegionGeometry {
            center_x: self.center_x,
            center_y: self.center_y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Owned region geometry handed to overlay renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionGeometry {
    /// Top-left corner and size as `(x, y, width, height)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        (
            self.center_x - self.width / 2.0,
            self.center_y - self.height / 2.0,
            self.width,
            self.height,
        )
    }
}
