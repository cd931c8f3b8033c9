//! Bilinear RGBA sampling in premultiplied space.
//!
//! Interpolating straight-alpha colours next to transparent pixels darkens
//! edges, so taps are premultiplied, blended, and divided back out.
//!
//! Coordinates follow the pixel-centre convention: integer `(x, y)` is the
//! centre of pixel `(x, y)`.
use super::rgba::{Rgba8, TRANSPARENT};
use super::traits::ImageView;

#[derive(Clone, Copy, Default)]
struct Premul {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Premul {
    #[inline]
    fn from_px(px: Rgba8) -> Self {
        let a = px[3] as f32 * (1.0 / 255.0);
        Self {
            r: px[0] as f32 * a,
            g: px[1] as f32 * a,
            b: px[2] as f32 * a,
            a,
        }
    }

    #[inline]
    fn accumulate(&mut self, other: Premul, weight: f32) {
        self.r += other.r * weight;
        self.g += other.g * weight;
        self.b += other.b * weight;
        self.a += other.a * weight;
    }

    #[inline]
    fn to_straight(self) -> Rgba8 {
        if self.a <= 1e-6 {
            return TRANSPARENT;
        }
        let inv = 1.0 / self.a;
        [
            quantize(self.r * inv),
            quantize(self.g * inv),
            quantize(self.b * inv),
            quantize(self.a * 255.0),
        ]
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample with replicate-border clamping; never returns border colour.
pub fn sample_bilinear_clamped<I>(img: &I, x: f32, y: f32) -> Rgba8
where
    I: ImageView<Pixel = Rgba8>,
{
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || !x.is_finite() || !y.is_finite() {
        return TRANSPARENT;
    }
    let xc = x.clamp(0.0, (w - 1) as f32);
    let yc = y.clamp(0.0, (h - 1) as f32);
    let x0 = xc.floor() as usize;
    let y0 = yc.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = xc - x0 as f32;
    let fy = yc - y0 as f32;

    let mut acc = Premul::default();
    acc.accumulate(Premul::from_px(img.pixel(x0, y0)), (1.0 - fx) * (1.0 - fy));
    acc.accumulate(Premul::from_px(img.pixel(x1, y0)), fx * (1.0 - fy));
    acc.accumulate(Premul::from_px(img.pixel(x0, y1)), (1.0 - fx) * fy);
    acc.accumulate(Premul::from_px(img.pixel(x1, y1)), fx * fy);
    acc.to_straight()
}

/// Sample with a constant transparent border: taps outside the image
/// contribute nothing, so coordinates far outside yield alpha 0.
pub fn sample_bilinear_transparent<I>(img: &I, x: f32, y: f32) -> Rgba8
where
    I: ImageView<Pixel = Rgba8>,
{
    let (w, h) = img.dimensions();
    if !x.is_finite() || !y.is_finite() {
        return TRANSPARENT;
    }
    if x <= -1.0 || y <= -1.0 || x >= w as f32 || y >= h as f32 {
        return TRANSPARENT;
    }
    let xf = x.floor();
    let yf = y.floor();
    let fx = x - xf;
    let fy = y - yf;
    let x0 = xf as i64;
    let y0 = yf as i64;

    let tap = |tx: i64, ty: i64| -> Premul {
        if tx < 0 || ty < 0 || tx >= w as i64 || ty >= h as i64 {
            Premul::default()
        } else {
            Premul::from_px(img.pixel(tx as usize, ty as usize))
        }
    };

    let mut acc = Premul::default();
    acc.accumulate(tap(x0, y0), (1.0 - fx) * (1.0 - fy));
    acc.accumulate(tap(x0 + 1, y0), fx * (1.0 - fy));
    acc.accumulate(tap(x0, y0 + 1), (1.0 - fx) * fy);
    acc.accumulate(tap(x0 + 1, y0 + 1), fx * fy);
    acc.to_straight()
}
