use serde::Deserialize;

/// Geometry gates applied before a homography is solved.
///
/// - `min_extent_px`: quads whose bounding-box diagonal is shorter than this
///   are treated as collapsed (e.g. every keypoint missing).
/// - `collinearity_tol`: relative area tolerance; a corner triple whose
///   doubled triangle area is below `tol · diagonal²` counts as collinear.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CompositorParams {
    pub min_extent_px: f64,
    pub collinearity_tol: f64,
}

impl Default for CompositorParams {
    fn default() -> Self {
        Self {
            min_extent_px: 1.0,
            collinearity_tol: 1e-4,
        }
    }
}
