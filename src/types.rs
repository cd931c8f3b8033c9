//! Value types shared by the pose, garment and compositing stages.
//!
//! Pose results mirror the JSON shape emitted by browser-style pose models
//! (`allPoses[].keypoints[] { part, position { x, y }, score }`). Every field
//! is optional on the wire so partially populated results still deserialize.
use serde::{Deserialize, Serialize};

/// A 2D location in pixel coordinates of one specific image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn to_f64(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

impl From<[f32; 2]> for Point2D {
    fn from(p: [f32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// One named landmark reported by the pose model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedKeypoint {
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub position: Point2D,
    /// Model confidence in [0, 1]. Accepts `score` on input.
    #[serde(default, alias = "score")]
    pub confidence: f32,
}

impl NamedKeypoint {
    pub fn new(part: impl Into<String>, position: Point2D, confidence: f32) -> Self {
        Self {
            part: part.into(),
            position,
            confidence,
        }
    }
}

/// Keypoints for a single detected person.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedPose {
    #[serde(default)]
    pub keypoints: Vec<NamedKeypoint>,
}

/// Raw output of the pose/segmentation collaborator for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseResult {
    #[serde(default)]
    pub all_poses: Vec<DetectedPose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PoseResult {
    /// Result holding one pose built from `keypoints`.
    pub fn single(keypoints: Vec<NamedKeypoint>) -> Self {
        Self {
            all_poses: vec![DetectedPose { keypoints }],
            width: None,
            height: None,
        }
    }

    /// The first detected pose; multi-person scenes only use this one.
    pub fn primary(&self) -> Option<&DetectedPose> {
        self.all_poses.first()
    }
}

/// Torso quad in frame coordinates:
/// `[leftShoulder, leftHip, rightHip, rightShoulder]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyQuad {
    pub corners: [Point2D; 4],
}

impl BodyQuad {
    pub fn new(
        left_shoulder: Point2D,
        left_hip: Point2D,
        right_hip: Point2D,
        right_shoulder: Point2D,
    ) -> Self {
        Self {
            corners: [left_shoulder, left_hip, right_hip, right_shoulder],
        }
    }

    pub fn left_shoulder(&self) -> Point2D {
        self.corners[0]
    }
    pub fn left_hip(&self) -> Point2D {
        self.corners[1]
    }
    pub fn right_hip(&self) -> Point2D {
        self.corners[2]
    }
    pub fn right_shoulder(&self) -> Point2D {
        self.corners[3]
    }
}

/// Garment quad in canonical canvas coordinates:
/// `[topLeft, bottomLeft, bottomRight, topRight]`.
///
/// Corner `i` corresponds to `BodyQuad::corners[i]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GarmentQuad {
    pub corners: [Point2D; 4],
}

impl GarmentQuad {
    pub fn top_left(&self) -> Point2D {
        self.corners[0]
    }
    pub fn bottom_left(&self) -> Point2D {
        self.corners[1]
    }
    pub fn bottom_right(&self) -> Point2D {
        self.corners[2]
    }
    pub fn top_right(&self) -> Point2D {
        self.corners[3]
    }

    /// Mean of the four corners; inside the quad whenever it is convex.
    pub fn centroid(&self) -> Point2D {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2D::new(sx / 4.0, sy / 4.0)
    }
}

/// Flat `[x0, y0, x1, y1, ...]` garment landmarks in upload pixel space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawLandmarkSet {
    pub values: Vec<f32>,
}

impl RawLandmarkSet {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Convert landmarks normalised to `[0, 1]` into pixel space of a
    /// `width × height` upload.
    pub fn from_normalized(values: &[f32], width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let values = values
            .iter()
            .enumerate()
            .map(|(i, v)| if i % 2 == 0 { v * w } else { v * h })
            .collect();
        Self { values }
    }

    /// Number of complete `(x, y)` pairs.
    pub fn point_count(&self) -> usize {
        self.values.len() / 2
    }

    /// Landmark `index` as a point, if both coordinates are present.
    pub fn point(&self, index: usize) -> Option<Point2D> {
        let x = *self.values.get(2 * index)?;
        let y = *self.values.get(2 * index + 1)?;
        Some(Point2D::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_result_tolerates_missing_fields() {
        let json = r#"{
            "allPoses": [
                { "keypoints": [
                    { "part": "leftShoulder", "position": { "x": 10.5, "y": 20 }, "score": 0.9 },
                    { "part": "nose" },
                    { "position": { "x": 3 } }
                ] }
            ]
        }"#;
        let result: PoseResult = serde_json::from_str(json).expect("valid pose json");
        let pose = result.primary().expect("one pose");
        assert_eq!(pose.keypoints.len(), 3);
        assert_eq!(pose.keypoints[0].position, Point2D::new(10.5, 20.0));
        assert!((pose.keypoints[0].confidence - 0.9).abs() < 1e-6);
        assert_eq!(pose.keypoints[1].position, Point2D::ORIGIN);
        assert_eq!(pose.keypoints[2].part, "");
        assert_eq!(result.width, None);
    }

    #[test]
    fn empty_object_is_an_empty_result() {
        let result: PoseResult = serde_json::from_str("{}").expect("empty json");
        assert!(result.primary().is_none());
    }

    #[test]
    fn landmark_set_reads_pairs() {
        let set = RawLandmarkSet::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(set.point_count(), 2);
        assert_eq!(set.point(1), Some(Point2D::new(3.0, 4.0)));
        assert_eq!(set.point(2), None);
    }

    #[test]
    fn normalized_landmarks_scale_to_pixels() {
        let set = RawLandmarkSet::from_normalized(&[0.5, 0.25, 1.0, 1.0], 300, 400);
        assert_eq!(set.values, vec![150.0, 100.0, 300.0, 400.0]);
    }

    #[test]
    fn garment_centroid_averages_corners() {
        let quad = GarmentQuad {
            corners: [
                Point2D::new(200.0, 100.0),
                Point2D::new(200.0, 200.0),
                Point2D::new(300.0, 200.0),
                Point2D::new(300.0, 100.0),
            ],
        };
        assert_eq!(quad.centroid(), Point2D::new(250.0, 150.0));
    }

    #[test]
    fn landmark_set_is_a_flat_json_array() {
        let set: RawLandmarkSet = serde_json::from_str("[1.0, 2.5]").expect("flat array");
        assert_eq!(set.point(0), Some(Point2D::new(1.0, 2.5)));
    }
}
