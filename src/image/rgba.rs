//! Owned RGBA8 image in row-major layout (stride == width).
//!
//! Channels are straight (non-premultiplied) alpha. Used for garment canvases,
//! warped layers and composited frames; every stage allocates a fresh buffer
//! so no pixel storage is shared between frames.
use super::traits::ImageView;
use super::view::Rgba8View;

/// One `[r, g, b, a]` pixel.
pub type Rgba8 = [u8; 4];

pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rgba8Image {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of pixels between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<Rgba8>,
}

impl Rgba8Image {
    /// Fully transparent buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, TRANSPARENT)
    }

    pub fn filled(w: usize, h: usize, px: Rgba8) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![px; w * h],
        }
    }

    /// Wrap interleaved RGBA bytes. Returns `None` when the length does not
    /// match `w × h × 4`.
    pub fn from_raw(w: usize, h: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != w.checked_mul(h)?.checked_mul(4)? {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Interleaved RGBA bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| px.iter().copied()).collect()
    }

    /// Copy a (possibly strided) view into a tightly packed buffer.
    pub fn from_view(view: &Rgba8View<'_>) -> Self {
        let mut data = Vec::with_capacity(view.w * view.h);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            w: view.w,
            h: view.h,
            stride: view.w,
            data,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Rgba8) {
        let i = self.idx(x, y);
        self.data[i] = px;
    }

    /// Borrow as a read-only view.
    pub fn as_view(&self) -> Rgba8View<'_> {
        Rgba8View {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &self.data,
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.data.iter().filter(|px| px[3] > 0).count()
    }
}

impl ImageView for Rgba8Image {
    type Pixel = Rgba8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgba8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bytes_round_trip() {
        let bytes: Vec<u8> = (0..24).collect();
        let img = Rgba8Image::from_raw(3, 2, &bytes).expect("3x2 rgba");
        assert_eq!(img.get(1, 0), [4, 5, 6, 7]);
        assert_eq!(img.get(0, 1), [12, 13, 14, 15]);
        assert_eq!(img.to_raw(), bytes);
    }

    #[test]
    fn raw_bytes_with_wrong_length_are_rejected() {
        assert!(Rgba8Image::from_raw(2, 2, &[0u8; 15]).is_none());
    }

    #[test]
    fn from_view_drops_row_padding() {
        // 2x2 pixels laid out with a stride of 3.
        let data = [
            [1, 0, 0, 255],
            [2, 0, 0, 255],
            [9, 9, 9, 9],
            [3, 0, 0, 255],
            [4, 0, 0, 255],
            [9, 9, 9, 9],
        ];
        let view = Rgba8View {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        let img = Rgba8Image::from_view(&view);
        assert_eq!(img.stride, 2);
        assert_eq!(img.data.len(), 4);
        assert_eq!(img.get(0, 1), [3, 0, 0, 255]);
        assert_eq!(img.opaque_count(), 4);
    }
}
