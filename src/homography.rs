//! Exact four-point homography solve and helpers.
//!
//! Provides:
//! - Quad validation (non-finite, collapsed or collinear corners).
//! - Direct linear transform for exactly four correspondences, conditioned with
//!   Hartley normalisation and solved as an 8×8 system (`h33 = 1`).
//! - Point projection and inversion with conditioning checks.
use crate::error::{QuadDefect, TryOnError};
use crate::types::Point2D;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f64 = 1e-12;
/// Smallest |det| accepted for the conditioned system and the conditioned H.
const MIN_CONDITIONED_DET: f64 = 1e-9;

/// Validate a quad before it enters a solve.
///
/// `min_extent_px` rejects quads whose bounding-box diagonal is shorter than
/// the given length. `collinearity_tol` is relative: a corner triple is
/// collinear when twice its triangle area is below `tol · diagonal²`.
pub fn check_quad(
    corners: &[Point2D; 4],
    min_extent_px: f64,
    collinearity_tol: f64,
) -> Result<(), QuadDefect> {
    if corners.iter().any(|p| !p.is_finite()) {
        return Err(QuadDefect::NonFinite);
    }
    let pts = corners.map(Point2D::to_f64);
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &pts {
        min_x = min_x.min(p[0]);
        min_y = min_y.min(p[1]);
        max_x = max_x.max(p[0]);
        max_y = max_y.max(p[1]);
    }
    let diag_sq = (max_x - min_x).powi(2) + (max_y - min_y).powi(2);
    if diag_sq.sqrt() < min_extent_px.max(EPS) {
        return Err(QuadDefect::Collapsed);
    }
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLES {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        if cross.abs() <= collinearity_tol * diag_sq {
            return Err(QuadDefect::Collinear);
        }
    }
    Ok(())
}

/// Translate the centroid to the origin and scale the mean distance to √2.
fn normalize_points(pts: &[[f64; 2]; 4]) -> (Matrix3<f64>, [[f64; 2]; 4]) {
    let cx = pts.iter().map(|p| p[0]).sum::<f64>() / 4.0;
    let cy = pts.iter().map(|p| p[1]).sum::<f64>() / 4.0;
    let mean_dist = pts
        .iter()
        .map(|p| ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;
    let s = if mean_dist > EPS {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let normalized = pts.map(|p| [s * (p[0] - cx), s * (p[1] - cy)]);
    (t, normalized)
}

/// Solve the homography `H` with `project(H, src[i]) == dst[i]` for all four
/// correspondences.
///
/// Callers are expected to have validated both quads with [`check_quad`]; a
/// singular or badly conditioned system is still reported as
/// `HomographySolveFailure` instead of yielding non-finite entries.
pub fn solve_four_point(
    src: &[Point2D; 4],
    dst: &[Point2D; 4],
) -> Result<Matrix3<f64>, TryOnError> {
    let (t_src, src_n) = normalize_points(&src.map(Point2D::to_f64));
    let (t_dst, dst_n) = normalize_points(&dst.map(Point2D::to_f64));

    // u = (h0 x + h1 y + h2) / (h6 x + h7 y + 1)
    // v = (h3 x + h4 y + h5) / (h6 x + h7 y + 1)
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let [x, y] = src_n[i];
        let [u, v] = dst_n[i];
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -x * u;
        a[(r, 7)] = -y * u;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -x * v;
        a[(r + 1, 7)] = -y * v;
        b[r + 1] = v;
    }

    let lu = a.lu();
    let det = lu.determinant();
    if !det.is_finite() || det.abs() < MIN_CONDITIONED_DET {
        return Err(TryOnError::HomographySolveFailure(
            "correspondence system is singular",
        ));
    }
    let h = lu.solve(&b).ok_or(TryOnError::HomographySolveFailure(
        "correspondence system is singular",
    ))?;

    let h_norm = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
    if h_norm.determinant().abs() < MIN_CONDITIONED_DET {
        return Err(TryOnError::HomographySolveFailure(
            "homography is near-singular",
        ));
    }

    // H = T_dst^-1 * H_norm * T_src
    let t_dst_inv = t_dst.try_inverse().ok_or(TryOnError::HomographySolveFailure(
        "destination normalisation is not invertible",
    ))?;
    let mut hmtx = t_dst_inv * h_norm * t_src;
    let scale = hmtx[(2, 2)];
    if scale.abs() > EPS {
        hmtx /= scale;
    }
    if hmtx.iter().any(|v| !v.is_finite()) {
        return Err(TryOnError::HomographySolveFailure(
            "homography has non-finite entries",
        ));
    }
    Ok(hmtx)
}

/// Invert a homography, rejecting singular matrices.
pub fn invert(h: &Matrix3<f64>) -> Result<Matrix3<f64>, TryOnError> {
    let inv = h
        .try_inverse()
        .ok_or(TryOnError::HomographySolveFailure("homography is not invertible"))?;
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(TryOnError::HomographySolveFailure(
            "inverse homography has non-finite entries",
        ));
    }
    Ok(inv)
}

/// Project a point through `h`; `None` when it maps to infinity.
pub fn project(h: &Matrix3<f64>, p: Point2D) -> Option<Point2D> {
    let v = h * Vector3::new(p.x as f64, p.y as f64, 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some(Point2D::new((v[0] / w) as f32, (v[1] / w) as f32))
}

/// Project every point; `None` if any of them maps to infinity.
pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[Point2D]) -> Option<Vec<Point2D>> {
    pts.iter().map(|&p| project(h, p)).collect()
}
