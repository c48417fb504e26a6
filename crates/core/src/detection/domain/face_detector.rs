use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for locating the dominant face region in a frame.
///
/// `&mut self` lets implementations reuse scratch buffers between frames;
/// the returned region borrows from them and must be consumed before the
/// next call.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Option<FaceRegion<'_>>;

    /// Candidate samples gathered by the last `detect`, including calls that
    /// found no region. `None` if the implementation does not sample.
    fn sample_count(&self) -> Option<usize> {
        None
    }
}
