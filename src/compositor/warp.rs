//! Inverse-mapped perspective warp with bilinear sampling.
//!
//! Every output pixel `(x, y)` is pulled from `H⁻¹ · (x, y, 1)` in the source.
//! Samples that land outside the source, or behind the projection (w ≤ 0),
//! are transparent, so nothing outside the garment canvas reaches the blend.
use crate::error::TryOnError;
use crate::homography;
use crate::image::sampling::sample_bilinear_transparent;
use crate::image::{ImageView, Rgba8, Rgba8Image, TRANSPARENT};
use crate::types::Point2D;
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

const W_EPS: f64 = 1e-12;

/// Warp `src` through `dst_from_src` into a fresh `out_w × out_h` layer.
///
/// `anchor` is a source point that must survive the warp, normally the
/// centroid of the garment quad. Only the side of the horizon holding it is
/// painted.
pub fn warp_perspective<I>(
    src: &I,
    dst_from_src: &Matrix3<f64>,
    anchor: Point2D,
    out_w: usize,
    out_h: usize,
) -> Result<Rgba8Image, TryOnError>
where
    I: ImageView<Pixel = Rgba8> + Sync,
{
    let h = orient_forward(dst_from_src, anchor);
    let src_from_dst = homography::invert(&h)?;
    Ok(warp_with_inverse(src, &src_from_dst, out_w, out_h))
}

/// Flip the overall sign of `h` so `anchor` projects with w > 0.
///
/// After this the inverse yields w > 0 exactly on the side of the horizon
/// that holds the anchor; the mirrored sheet beyond it stays transparent.
fn orient_forward(h: &Matrix3<f64>, anchor: Point2D) -> Matrix3<f64> {
    let [x, y] = anchor.to_f64();
    if (h * Vector3::new(x, y, 1.0))[2] < 0.0 {
        -*h
    } else {
        *h
    }
}

fn warp_with_inverse<I>(
    src: &I,
    src_from_dst: &Matrix3<f64>,
    out_w: usize,
    out_h: usize,
) -> Rgba8Image
where
    I: ImageView<Pixel = Rgba8> + Sync,
{
    let mut out = Rgba8Image::new(out_w, out_h);
    if out_w == 0 || out_h == 0 || src.is_empty() {
        return out;
    }
    let col_x = src_from_dst.column(0).clone_owned();
    out.data
        .par_chunks_mut(out_w)
        .enumerate()
        .for_each(|(y, row)| {
            let mut p = src_from_dst * Vector3::new(0.0, y as f64, 1.0);
            for px in row.iter_mut() {
                let w = p[2];
                *px = if w > W_EPS {
                    sample_bilinear_transparent(src, (p[0] / w) as f32, (p[1] / w) as f32)
                } else {
                    TRANSPARENT
                };
                p += col_x;
            }
        });
    out
}
