/// Domain interface for per-pixel skin likelihood.
///
/// Implementations must be pure: the same `(r, g, b)` always yields the same
/// score in `[0, 1]`, where 0 means "not skin".
pub trait SkinClassifier: Send {
    fn score(&self, r: u8, g: u8, b: u8) -> f64;
}
