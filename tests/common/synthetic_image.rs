use garment_tryon::image::Rgba8Image;
use garment_tryon::types::{NamedKeypoint, Point2D, PoseResult, RawLandmarkSet};

/// Image with a distinct colour per pixel so resampling differences show up.
pub fn gradient_rgba(width: usize, height: usize) -> Rgba8Image {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = Rgba8Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x + y) % 256) as u8;
            img.set(x, y, [r, g, b, 255]);
        }
    }
    img
}

/// Flat opaque frame.
pub fn solid_frame(width: usize, height: usize, colour: [u8; 3]) -> Rgba8Image {
    Rgba8Image::filled(width, height, [colour[0], colour[1], colour[2], 255])
}

/// 50-value landmark array (25 points) with the given `(index, x, y)` set and
/// every other point at `fill`.
pub fn landmarks_with(points: &[(usize, f32, f32)], fill: f32) -> RawLandmarkSet {
    let mut values = vec![fill; 50];
    for &(index, x, y) in points {
        values[2 * index] = x;
        values[2 * index + 1] = y;
    }
    RawLandmarkSet::new(values)
}

/// Single-pose result with the given named keypoints at full confidence.
pub fn pose_with(parts: &[(&str, f32, f32)]) -> PoseResult {
    PoseResult::single(
        parts
            .iter()
            .map(|&(part, x, y)| NamedKeypoint::new(part, Point2D::new(x, y), 1.0))
            .collect(),
    )
}

/// Full torso: shoulders at `top`, hips at `bottom`.
pub fn torso_pose(left: f32, right: f32, top: f32, bottom: f32) -> PoseResult {
    pose_with(&[
        ("leftShoulder", left, top),
        ("rightShoulder", right, top),
        ("leftHip", left, bottom),
        ("rightHip", right, bottom),
    ])
}
