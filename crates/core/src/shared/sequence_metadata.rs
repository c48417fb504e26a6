use std::path::PathBuf;

/// Describes a frame sequence opened by a [`FrameSource`].
///
/// [`FrameSource`]: crate::video::domain::frame_source::FrameSource
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceMetadata {
    /// Dimensions of the first frame; later frames may differ.
    pub width: u32,
    pub height: u32,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}
