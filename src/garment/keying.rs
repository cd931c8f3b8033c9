//! Background keying for garments that arrive pre-segmented on black.
use crate::image::{Rgba8Image, TRANSPARENT};
use rayon::prelude::*;

/// Copy of `img` with near-black pixels made fully transparent.
///
/// A pixel is keyed when each of its colour channels is `<= threshold`;
/// `threshold = 0` keys exact black only.
pub fn key_black_background(img: &Rgba8Image, threshold: u8) -> Rgba8Image {
    let mut out = img.clone();
    out.data.par_iter_mut().for_each(|px| {
        if px[0] <= threshold && px[1] <= threshold && px[2] <= threshold {
            *px = TRANSPARENT;
        }
    });
    out
}
