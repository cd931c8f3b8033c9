/// Borrowed RGBA8 view over externally owned pixels (e.g. a camera frame).
#[derive(Clone, Copy, Debug)]
pub struct Rgba8View<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // pixels between rows
    pub data: &'a [super::Rgba8],
}

impl<'a> Rgba8View<'a> {
    /// Returns `None` when `data` is too short for `h` rows of `stride` pixels.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [super::Rgba8]) -> Option<Self> {
        if stride < w {
            return None;
        }
        let needed = if h == 0 { 0 } else { (h - 1) * stride + w };
        (data.len() >= needed).then_some(Self { w, h, stride, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> super::Rgba8 {
        self.data[y * self.stride + x]
    }
}

impl<'a> crate::image::traits::ImageView for Rgba8View<'a> {
    type Pixel = super::Rgba8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[super::Rgba8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
