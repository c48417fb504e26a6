//! Color-space conversions used by the skin classifier.
//!
//! Inputs are 8-bit RGB channels. YCbCr uses the BT.601 full-range
//! coefficients with chroma offset 128; HSV returns hue in degrees `[0, 360)`
//! and saturation/value in `[0, 1]`.

/// `(Y, Cb, Cr)` for an 8-bit RGB pixel.
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.169 * r - 0.331 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.419 * g - 0.081 * b + 128.0;
    (y, cb, cr)
}

/// `(H, S, V)` for an 8-bit RGB pixel.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, v)
}
