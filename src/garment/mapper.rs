//! Garment preparation: canonical canvas plus garment quad.
//!
//! Runs once per upload. The result is an immutable [`GarmentProfile`]; a new
//! upload produces a new profile instead of touching the old one, so callers
//! can swap profiles atomically.
use super::params::GarmentParams;
use super::placement::CanvasPlacement;
use crate::error::{LandmarkDefect, TryOnError};
use crate::image::sampling::sample_bilinear_clamped;
use crate::image::{ImageView, Rgba8, Rgba8Image};
use crate::types::{GarmentQuad, Point2D, RawLandmarkSet};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

/// Canvas and quad from one upload. Read-only once built.
#[derive(Clone, Debug)]
pub struct GarmentProfile {
    canvas: Rgba8Image,
    quad: GarmentQuad,
    placement: CanvasPlacement,
    source_size: (usize, usize),
}

impl GarmentProfile {
    pub fn canvas(&self) -> &Rgba8Image {
        &self.canvas
    }

    pub fn quad(&self) -> &GarmentQuad {
        &self.quad
    }

    pub fn placement(&self) -> &CanvasPlacement {
        &self.placement
    }

    /// `(width, height)` of the image the profile was prepared from.
    pub fn source_size(&self) -> (usize, usize) {
        self.source_size
    }

    pub fn summary(&self) -> GarmentSummary {
        GarmentSummary {
            canvas_size: [self.canvas.w, self.canvas.h],
            source_size: [self.source_size.0, self.source_size.1],
            quad: self.quad,
            placement: self.placement,
        }
    }
}

/// Serializable description of a profile (no pixel data).
#[derive(Clone, Debug, Serialize)]
pub struct GarmentSummary {
    pub canvas_size: [usize; 2],
    pub source_size: [usize; 2],
    pub quad: GarmentQuad,
    pub placement: CanvasPlacement,
}

#[derive(Clone, Debug, Default)]
pub struct GarmentLandmarkMapper {
    params: GarmentParams,
}

impl GarmentLandmarkMapper {
    pub fn new(params: GarmentParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GarmentParams {
        &self.params
    }

    /// Build the canonical canvas and garment quad for `image`.
    ///
    /// `landmarks` must be expressed in the pixel space of `image` itself.
    /// Validation happens before any pixel work, so a rejected upload costs
    /// nothing and produces no partial profile.
    pub fn prepare<I>(&self, image: &I, landmarks: &RawLandmarkSet) -> Result<GarmentProfile, TryOnError>
    where
        I: ImageView<Pixel = Rgba8> + Sync,
    {
        let (src_w, src_h) = image.dimensions();
        let placement = CanvasPlacement::fit_height(
            src_w,
            src_h,
            self.params.canvas_width,
            self.params.canvas_height,
        )?;
        let quad = self.select_quad(landmarks, &placement)?;
        let canvas = self.render_canvas(image, &placement);
        debug!(
            "GarmentLandmarkMapper::prepare {}x{} -> draw {:.1}x{:.1} at x={:.1}, quad={:?}",
            src_w, src_h, placement.draw_width, placement.draw_height, placement.offset_x, quad
        );
        Ok(GarmentProfile {
            canvas,
            quad,
            placement,
            source_size: (src_w, src_h),
        })
    }

    fn select_quad(
        &self,
        landmarks: &RawLandmarkSet,
        placement: &CanvasPlacement,
    ) -> Result<GarmentQuad, TryOnError> {
        let required = self.params.required_landmark_values();
        if landmarks.values.len() < required {
            return Err(TryOnError::InvalidLandmarkData(LandmarkDefect::TooShort {
                found: landmarks.values.len(),
                required,
            }));
        }
        let mut corners = [Point2D::ORIGIN; 4];
        for (corner, &index) in corners.iter_mut().zip(self.params.landmark_indices.iter()) {
            let raw = landmarks
                .point(index)
                .ok_or(TryOnError::InvalidLandmarkData(LandmarkDefect::TooShort {
                    found: landmarks.values.len(),
                    required,
                }))?;
            if !raw.is_finite() {
                return Err(TryOnError::InvalidLandmarkData(LandmarkDefect::NonFinite {
                    index,
                }));
            }
            *corner = placement.to_canvas(raw);
        }
        Ok(GarmentQuad { corners })
    }

    fn render_canvas<I>(&self, image: &I, placement: &CanvasPlacement) -> Rgba8Image
    where
        I: ImageView<Pixel = Rgba8> + Sync,
    {
        let mut canvas = Rgba8Image::new(self.params.canvas_width, self.params.canvas_height);
        let width = canvas.w;
        if width == 0 {
            return canvas;
        }
        canvas
            .data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(cy, row)| {
                for (cx, px) in row.iter_mut().enumerate() {
                    if let Some((sx, sy)) = placement.source_sample(cx, cy) {
                        *px = sample_bilinear_clamped(image, sx, sy);
                    }
                }
            });
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarks_with(points: &[(usize, f32, f32)]) -> RawLandmarkSet {
        let mut values = vec![0.0f32; 50];
        for &(i, x, y) in points {
            values[2 * i] = x;
            values[2 * i + 1] = y;
        }
        RawLandmarkSet::new(values)
    }

    #[test]
    fn quad_is_read_in_index_order() {
        let image = Rgba8Image::filled(640, 480, [1, 2, 3, 255]);
        let lm = landmarks_with(&[(6, 10.0, 20.0), (14, 11.0, 300.0), (16, 400.0, 301.0), (24, 401.0, 21.0)]);
        let profile = GarmentLandmarkMapper::default()
            .prepare(&image, &lm)
            .expect("valid upload");
        let q = profile.quad();
        assert_eq!(q.top_left(), Point2D::new(10.0, 20.0));
        assert_eq!(q.bottom_left(), Point2D::new(11.0, 300.0));
        assert_eq!(q.bottom_right(), Point2D::new(400.0, 301.0));
        assert_eq!(q.top_right(), Point2D::new(401.0, 21.0));
        assert_eq!(profile.canvas().get(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn short_landmarks_are_rejected() {
        let image = Rgba8Image::filled(10, 10, [0, 0, 0, 255]);
        let lm = RawLandmarkSet::new(vec![0.0; 49]);
        assert_eq!(
            GarmentLandmarkMapper::default().prepare(&image, &lm).unwrap_err(),
            TryOnError::InvalidLandmarkData(LandmarkDefect::TooShort {
                found: 49,
                required: 50
            })
        );
    }

    #[test]
    fn nan_landmark_is_rejected() {
        let image = Rgba8Image::filled(10, 10, [0, 0, 0, 255]);
        let lm = landmarks_with(&[(16, f32::NAN, 1.0)]);
        assert_eq!(
            GarmentLandmarkMapper::default().prepare(&image, &lm).unwrap_err(),
            TryOnError::InvalidLandmarkData(LandmarkDefect::NonFinite { index: 16 })
        );
    }

    #[test]
    fn empty_image_is_rejected_before_landmarks() {
        let image = Rgba8Image::new(0, 0);
        let lm = RawLandmarkSet::new(Vec::new());
        assert!(matches!(
            GarmentLandmarkMapper::default().prepare(&image, &lm),
            Err(TryOnError::InvalidGarmentImage { .. })
        ));
    }

    #[test]
    fn margins_stay_transparent() {
        let image = Rgba8Image::filled(300, 400, [200, 10, 10, 255]);
        let profile = GarmentLandmarkMapper::default()
            .prepare(&image, &landmarks_with(&[]))
            .expect("valid upload");
        let canvas = profile.canvas();
        assert_eq!(canvas.get(0, 240)[3], 0);
        assert_eq!(canvas.get(639, 240)[3], 0);
        assert_eq!(canvas.get(320, 240), [200, 10, 10, 255]);
        assert_eq!(canvas.opaque_count(), 360 * 480);
    }
}
