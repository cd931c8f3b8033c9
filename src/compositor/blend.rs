//! Straight-alpha "over" compositing of a layer onto a frame.
use crate::image::{Rgba8, Rgba8Image};
use rayon::prelude::*;

/// `src` over `dst`. Alpha 0 leaves `dst` untouched; alpha 255 replaces it.
#[inline]
pub fn blend_pixel(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let a_s = sa as f32 / 255.0;
            let a_d = dst[3] as f32 / 255.0;
            let keep = a_d * (1.0 - a_s);
            let a_out = a_s + keep;
            let mix = |s: u8, d: u8| -> u8 {
                ((s as f32 * a_s + d as f32 * keep) / a_out)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            [
                mix(src[0], dst[0]),
                mix(src[1], dst[1]),
                mix(src[2], dst[2]),
                (a_out * 255.0).round().clamp(0.0, 255.0) as u8,
            ]
        }
    }
}

/// Blend `layer` over `dst` in place across their common area.
pub fn blend_over(dst: &mut Rgba8Image, layer: &Rgba8Image) {
    let w = dst.w.min(layer.w);
    let h = dst.h.min(layer.h);
    if w == 0 || h == 0 {
        return;
    }
    let dst_stride = dst.stride;
    dst.data
        .par_chunks_mut(dst_stride)
        .take(h)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &layer.data[y * layer.stride..y * layer.stride + w];
            for (d, &s) in row[..w].iter_mut().zip(src_row) {
                *d = blend_pixel(*d, s);
            }
        });
}
