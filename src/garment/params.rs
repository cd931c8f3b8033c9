//! Parameters tying garment preparation to the landmark numbering convention.
//!
//! The canvas size and the four landmark indices are part of the contract with
//! the garment landmark provider (DeepFashion2-style shirt numbering). They are
//! configuration so a different convention only needs a new config.
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANVAS_WIDTH: usize = 640;
pub const DEFAULT_CANVAS_HEIGHT: usize = 480;
/// Landmark indices for `[topLeft, bottomLeft, bottomRight, topRight]`.
pub const DEFAULT_LANDMARK_INDICES: [usize; 4] = [6, 14, 16, 24];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarmentParams {
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Pair indices into the flat landmark array, in garment quad order.
    pub landmark_indices: [usize; 4],
    /// Pixels with every colour channel at or below this value are keyed to
    /// transparent when the garment arrives pre-segmented on black.
    pub key_threshold: u8,
}

impl Default for GarmentParams {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            landmark_indices: DEFAULT_LANDMARK_INDICES,
            key_threshold: 0,
        }
    }
}

impl GarmentParams {
    /// Minimum flat landmark length able to serve every selected index.
    pub fn required_landmark_values(&self) -> usize {
        let max_index = self.landmark_indices.iter().copied().max().unwrap_or(0);
        2 * (max_index + 1)
    }
}

/// Which image becomes the canonical canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentSource {
    /// The uploaded image as-is.
    #[default]
    Original,
    /// The provider's pre-segmented variant, black background keyed out.
    /// Falls back to the original when the provider returns none.
    Segmented,
}
