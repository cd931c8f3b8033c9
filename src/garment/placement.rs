//! Aspect-preserving placement of an upload on the canonical canvas.
//!
//! The source is scaled to the canvas height and centred horizontally; wide
//! sources overhang both sides (negative `offset_x`) and are cropped.
use crate::error::TryOnError;
use crate::types::Point2D;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CanvasPlacement {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CanvasPlacement {
    /// Fit a `src_w × src_h` image to the height of a `canvas_w × canvas_h`
    /// canvas.
    pub fn fit_height(
        src_w: usize,
        src_h: usize,
        canvas_w: usize,
        canvas_h: usize,
    ) -> Result<Self, TryOnError> {
        if src_w == 0 || src_h == 0 {
            return Err(TryOnError::InvalidGarmentImage {
                width: src_w,
                height: src_h,
            });
        }
        let aspect = src_w as f64 / src_h as f64;
        let draw_height = canvas_h as f64;
        let draw_width = draw_height * aspect;
        let offset_x = (canvas_w as f64 - draw_width) / 2.0;
        Ok(Self {
            draw_width,
            draw_height,
            offset_x,
            offset_y: 0.0,
            scale_x: draw_width / src_w as f64,
            scale_y: draw_height / src_h as f64,
        })
    }

    /// Map a point from upload pixel space into canvas space.
    pub fn to_canvas(&self, p: Point2D) -> Point2D {
        Point2D::new(
            (p.x as f64 * self.scale_x + self.offset_x) as f32,
            (p.y as f64 * self.scale_y + self.offset_y) as f32,
        )
    }

    /// Source sample position for the centre of canvas pixel `(cx, cy)`, or
    /// `None` when that centre falls outside the drawn rectangle.
    pub fn source_sample(&self, cx: usize, cy: usize) -> Option<(f32, f32)> {
        let px = cx as f64 + 0.5 - self.offset_x;
        let py = cy as f64 + 0.5 - self.offset_y;
        if px < 0.0 || py < 0.0 || px >= self.draw_width || py >= self.draw_height {
            return None;
        }
        Some((
            (px / self.scale_x - 0.5) as f32,
            (py / self.scale_y - 0.5) as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_image_is_centred() {
        let p = CanvasPlacement::fit_height(300, 400, 640, 480).expect("placement");
        assert_eq!(p.draw_height, 480.0);
        assert!((p.draw_width - 360.0).abs() < 1e-9);
        assert!((p.offset_x - 140.0).abs() < 1e-9);
        assert_eq!(p.offset_y, 0.0);
    }

    #[test]
    fn wide_image_overhangs_the_canvas() {
        let p = CanvasPlacement::fit_height(1600, 400, 640, 480).expect("placement");
        assert!((p.draw_width - 1920.0).abs() < 1e-9);
        assert!((p.offset_x + 640.0).abs() < 1e-9);
    }

    #[test]
    fn zero_height_is_rejected() {
        assert_eq!(
            CanvasPlacement::fit_height(300, 0, 640, 480),
            Err(TryOnError::InvalidGarmentImage {
                width: 300,
                height: 0
            })
        );
    }

    #[test]
    fn pixel_centres_outside_the_drawing_have_no_source() {
        let p = CanvasPlacement::fit_height(300, 400, 640, 480).expect("placement");
        assert!(p.source_sample(139, 0).is_none());
        assert!(p.source_sample(140, 0).is_some());
        assert!(p.source_sample(499, 479).is_some());
        assert!(p.source_sample(500, 0).is_none());
    }
}
