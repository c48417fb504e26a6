use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::{Frame, FrameError};
use crate::shared::sequence_metadata::SequenceMetadata;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum SequenceReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("no image files found in {0}")]
    NoFrames(PathBuf),
    #[error("image sequence has not been opened")]
    NotOpened,
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Reads a single image, or every image in a directory, as a frame sequence.
///
/// Directory entries are filtered by extension and played back in file-name
/// order, so zero-padded names (`frame_0001.png`) sort naturally. Frames are
/// decoded lazily and always converted to RGB.
pub struct ImageSequenceReader {
    paths: Vec<PathBuf>,
    metadata: Option<SequenceMetadata>,
}

impl ImageSequenceReader {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            metadata: None,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Default for ImageSequenceReader {
    fn default() -> Self {
        Self::new()
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, SequenceReadError> {
    let entries = fs::read_dir(dir).map_err(|source| SequenceReadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        } else {
            log::debug!("Skipping non-image entry {}", path.display());
        }
    }
    paths.sort();
    Ok(paths)
}

fn decode_frame(path: &Path, index: usize) -> Result<Frame, SequenceReadError> {
    let rgb = image::open(path)
        .map_err(|source| SequenceReadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3, index)?)
}

impl FrameSource for ImageSequenceReader {
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>> {
        let paths = if path.is_dir() {
            list_images(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            return Err(SequenceReadError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .into());
        };

        let first = paths
            .first()
            .ok_or_else(|| SequenceReadError::NoFrames(path.to_path_buf()))?;
        let (width, height) =
            image::image_dimensions(first).map_err(|source| SequenceReadError::Decode {
                path: first.clone(),
                source,
            })?;

        let metadata = SequenceMetadata {
            width,
            height,
            total_frames: paths.len(),
            source_path: Some(path.to_path_buf()),
        };
        log::info!(
            "Opened {} ({} frames, {}x{})",
            path.display(),
            metadata.total_frames,
            width,
            height
        );

        self.paths = paths;
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.metadata.is_none() {
            return Box::new(std::iter::once(Err(SequenceReadError::NotOpened.into())));
        }
        Box::new(self.paths.iter().enumerate().map(
            |(index, path)| -> Result<Frame, Box<dyn std::error::Error>> {
                Ok(decode_frame(path, index)?)
            },
        ))
    }

    fn close(&mut self) {
        self.paths.clear();
        self.metadata = None;
    }
}
