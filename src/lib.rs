#![doc = include_str!("../README.md")]

// Core pipeline
pub mod compositor;
pub mod error;
pub mod garment;
pub mod homography;
pub mod image;
pub mod pose;
pub mod types;

// Runtime, diagnostics and demo configuration
pub mod config;
pub mod diagnostics;
pub mod runtime;

// --- High-level re-exports -------------------------------------------------

pub use crate::compositor::{CompositeOutcome, CompositorParams, PerspectiveCompositor};
pub use crate::error::TryOnError;
pub use crate::garment::{GarmentLandmarkMapper, GarmentParams, GarmentProfile};
pub use crate::pose::PoseExtractor;
pub use crate::types::{BodyQuad, GarmentQuad, Point2D, PoseResult, RawLandmarkSet};

pub use crate::homography::{apply_homography_points, solve_four_point};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use garment_tryon::prelude::*;
///
/// # fn main() -> Result<(), TryOnError> {
/// let garment = Rgba8Image::filled(300, 400, [200, 30, 30, 255]);
/// let mut values = vec![0.0f32; 50];
/// for (i, (x, y)) in [(6, (84.0, 240.0)), (14, (65.0, 270.0)), (16, (45.0, 304.0)), (24, (225.0, 200.0))] {
///     values[2 * i] = x;
///     values[2 * i + 1] = y;
/// }
/// let profile = GarmentLandmarkMapper::default().prepare(&garment, &RawLandmarkSet::new(values))?;
///
/// let pose = PoseResult::default();
/// let body = PoseExtractor::default().extract(&pose);
/// let frame = Rgba8Image::filled(640, 480, [0, 0, 0, 255]);
/// let outcome = PerspectiveCompositor::default().composite_profile(&profile, &body, frame.as_view());
/// println!("overlay: {:?}", outcome.overlay);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, Rgba8Image};
    pub use crate::{
        BodyQuad, GarmentLandmarkMapper, GarmentProfile, PerspectiveCompositor, PoseExtractor,
        PoseResult, RawLandmarkSet, TryOnError,
    };
}
