use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

/// Supplies the frames of a recorded sequence.
///
/// Implementations own decoding and file discovery; the analysis pipeline
/// only sees `Frame` and `SequenceMetadata`.
pub trait FrameSource: Send {
    /// Opens a sequence and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in playback order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
