//! Per-frame perspective compositing.
//!
//! Typical usage:
//! ```no_run
//! use garment_tryon::compositor::PerspectiveCompositor;
//! use garment_tryon::garment::GarmentProfile;
//! use garment_tryon::image::Rgba8Image;
//! use garment_tryon::types::BodyQuad;
//!
//! # fn example(profile: &GarmentProfile, body: &BodyQuad, frame: &Rgba8Image) {
//! let compositor = PerspectiveCompositor::default();
//! let outcome = compositor.composite_profile(profile, body, frame.as_view());
//! if outcome.overlay.is_drawn() {
//!     println!("warp took {:?} ms", outcome.timings.stage_ms("warp"));
//! }
//! # }
//! ```
use super::blend::blend_over;
use super::params::CompositorParams;
use super::warp::warp_perspective;
use crate::diagnostics::{elapsed_ms, OverlayStatus, TimingBreakdown};
use crate::error::{QuadRole, TryOnError};
use crate::garment::GarmentProfile;
use crate::homography::{check_quad, solve_four_point};
use crate::image::{ImageView, Rgba8, Rgba8Image, Rgba8View};
use crate::types::{BodyQuad, GarmentQuad};
use log::debug;
use nalgebra::Matrix3;
use std::time::Instant;

/// Output pixels for one frame: same size as the input frame.
pub type CompositedFrame = Rgba8Image;

#[derive(Clone, Debug)]
pub struct CompositeOutcome {
    pub frame: CompositedFrame,
    pub overlay: OverlayStatus,
    pub timings: TimingBreakdown,
}

/// Maps the garment quad onto the body quad and blends the garment over the
/// frame. Holds only parameters; no state survives between calls.
#[derive(Clone, Debug, Default)]
pub struct PerspectiveCompositor {
    params: CompositorParams,
}

impl PerspectiveCompositor {
    pub fn new(params: CompositorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CompositorParams {
        &self.params
    }

    /// Validate both quads and solve `garment[i] -> body[i]`.
    pub fn homography(
        &self,
        garment: &GarmentQuad,
        body: &BodyQuad,
    ) -> Result<Matrix3<f64>, TryOnError> {
        let (extent, tol) = (self.params.min_extent_px, self.params.collinearity_tol);
        check_quad(&body.corners, extent, tol).map_err(|defect| TryOnError::DegenerateQuad {
            role: QuadRole::Body,
            defect,
        })?;
        check_quad(&garment.corners, extent, tol).map_err(|defect| {
            TryOnError::DegenerateQuad {
                role: QuadRole::Garment,
                defect,
            }
        })?;
        solve_four_point(&garment.corners, &body.corners)
    }

    /// Composite or fail; the frame is never modified.
    ///
    /// Intermediates (matrix, warped layer) live only inside this call and are
    /// dropped on every return path.
    pub fn try_composite<I>(
        &self,
        canvas: &I,
        garment: &GarmentQuad,
        body: &BodyQuad,
        frame: Rgba8View<'_>,
    ) -> Result<(CompositedFrame, TimingBreakdown), TryOnError>
    where
        I: ImageView<Pixel = Rgba8> + Sync,
    {
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mut clock = Instant::now();

        let hmtx = self.homography(garment, body)?;
        timings.lap("homography", &mut clock);

        let layer = warp_perspective(canvas, &hmtx, garment.centroid(), frame.w, frame.h)?;
        timings.lap("warp", &mut clock);

        let mut out = Rgba8Image::from_view(&frame);
        blend_over(&mut out, &layer);
        timings.lap("blend", &mut clock);

        timings.total_ms = elapsed_ms(total);
        Ok((out, timings))
    }

    /// Composite, degrading to an unmodified copy of the frame when the
    /// geometry is unusable. Never fails.
    pub fn composite<I>(
        &self,
        canvas: &I,
        garment: &GarmentQuad,
        body: &BodyQuad,
        frame: Rgba8View<'_>,
    ) -> CompositeOutcome
    where
        I: ImageView<Pixel = Rgba8> + Sync,
    {
        let start = Instant::now();
        match self.try_composite(canvas, garment, body, frame) {
            Ok((frame, timings)) => CompositeOutcome {
                frame,
                overlay: OverlayStatus::Drawn,
                timings,
            },
            Err(err) => {
                debug!("PerspectiveCompositor::composite skipping overlay: {err}");
                let mut timings = TimingBreakdown::default();
                timings.total_ms = elapsed_ms(start);
                CompositeOutcome {
                    frame: Rgba8Image::from_view(&frame),
                    overlay: OverlayStatus::skipped(&err),
                    timings,
                }
            }
        }
    }

    /// [`composite`](Self::composite) with canvas and quad taken from one
    /// prepared garment.
    pub fn composite_profile(
        &self,
        profile: &GarmentProfile,
        body: &BodyQuad,
        frame: Rgba8View<'_>,
    ) -> CompositeOutcome {
        self.composite(profile.canvas(), profile.quad(), body, frame)
    }
}
