use std::fmt;

use serde::{Deserialize, Serialize};

/// Head orientation as seen by the camera.
///
/// `None` means no face region was found in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Straight,
    Left,
    Right,
    None,
}

impl Orientation {
    /// Every variant, in tie-break priority order for smoothing.
    pub const ALL: [Orientation; 4] = [
        Orientation::Straight,
        Orientation::Left,
        Orientation::Right,
        Orientation::None,
    ];

    /// Stable slot in [`Orientation::ALL`], used for per-variant accumulators.
    pub fn index(self) -> usize {
        match self {
            Orientation::Straight => 0,
            Orientation::Left => 1,
            Orientation::Right => 2,
            Orientation::None => 3,
        }
    }

    pub fn is_face(self) -> bool {
        !matches!(self, Orientation::None)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Orientation::Straight => "straight",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::None => "none",
        };
        f.pad(label)
    }
}
