//! Body quad extraction from a raw pose result.
//!
//! Only the first detected pose is used. Each corner is the first keypoint
//! whose `part` matches; missing parts fall back to the origin so the output
//! is always a well-formed quad (possibly degenerate).
use crate::types::{BodyQuad, DetectedPose, Point2D, PoseResult};
use log::debug;
use serde::Deserialize;

/// Torso landmarks in body-quad corner order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyPart {
    LeftShoulder,
    LeftHip,
    RightHip,
    RightShoulder,
}

impl BodyPart {
    /// Corner order of [`BodyQuad`].
    pub const QUAD_ORDER: [BodyPart; 4] = [
        BodyPart::LeftShoulder,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::RightShoulder,
    ];

    /// Part identifier used by the pose model.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::LeftShoulder => "leftShoulder",
            BodyPart::LeftHip => "leftHip",
            BodyPart::RightHip => "rightHip",
            BodyPart::RightShoulder => "rightShoulder",
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PoseExtractorParams {
    /// Keypoints below this confidence count as missing. `0.0` accepts all.
    pub min_confidence: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PoseExtractor {
    params: PoseExtractorParams,
}

impl PoseExtractor {
    pub fn new(params: PoseExtractorParams) -> Self {
        Self { params }
    }

    /// Build the body quad for the primary pose of `result`.
    pub fn extract(&self, result: &PoseResult) -> BodyQuad {
        let Some(pose) = result.primary() else {
            debug!("PoseExtractor::extract no pose detected");
            return BodyQuad::default();
        };
        let corners = BodyPart::QUAD_ORDER.map(|part| self.locate(pose, part));
        BodyQuad { corners }
    }

    fn locate(&self, pose: &DetectedPose, part: BodyPart) -> Point2D {
        let name = part.as_str();
        match pose.keypoints.iter().find(|kp| kp.part == name) {
            Some(kp) if kp.confidence >= self.params.min_confidence => kp.position,
            Some(kp) => {
                debug!(
                    "PoseExtractor::extract {name} below confidence gate ({:.3} < {:.3})",
                    kp.confidence, self.params.min_confidence
                );
                Point2D::ORIGIN
            }
            None => Point2D::ORIGIN,
        }
    }
}

/// Extract with default parameters.
pub fn extract_body_quad(result: &PoseResult) -> BodyQuad {
    PoseExtractor::default().extract(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectedPose, NamedKeypoint};

    fn kp(part: &str, x: f32, y: f32) -> NamedKeypoint {
        NamedKeypoint::new(part, Point2D::new(x, y), 0.9)
    }

    #[test]
    fn corners_follow_fixed_order_regardless_of_input_order() {
        let result = PoseResult::single(vec![
            kp("rightShoulder", 4.0, 4.0),
            kp("nose", 9.0, 9.0),
            kp("rightHip", 3.0, 3.0),
            kp("leftHip", 2.0, 2.0),
            kp("leftShoulder", 1.0, 1.0),
        ]);
        let quad = extract_body_quad(&result);
        assert_eq!(quad.left_shoulder(), Point2D::new(1.0, 1.0));
        assert_eq!(quad.left_hip(), Point2D::new(2.0, 2.0));
        assert_eq!(quad.right_hip(), Point2D::new(3.0, 3.0));
        assert_eq!(quad.right_shoulder(), Point2D::new(4.0, 4.0));
    }

    #[test]
    fn first_duplicate_wins() {
        let result = PoseResult::single(vec![
            kp("leftShoulder", 1.0, 1.0),
            kp("leftShoulder", 7.0, 7.0),
        ]);
        assert_eq!(extract_body_quad(&result).left_shoulder(), Point2D::new(1.0, 1.0));
    }

    #[test]
    fn only_the_first_pose_is_used() {
        let result = PoseResult {
            all_poses: vec![
                DetectedPose {
                    keypoints: vec![kp("leftHip", 5.0, 6.0)],
                },
                DetectedPose {
                    keypoints: vec![kp("leftShoulder", 1.0, 1.0)],
                },
            ],
            ..Default::default()
        };
        let quad = extract_body_quad(&result);
        assert_eq!(quad.left_hip(), Point2D::new(5.0, 6.0));
        assert_eq!(quad.left_shoulder(), Point2D::ORIGIN);
    }

    #[test]
    fn empty_result_yields_all_zero_quad() {
        let quad = extract_body_quad(&PoseResult::default());
        assert_eq!(quad.corners, [Point2D::ORIGIN; 4]);
    }

    #[test]
    fn confidence_gate_drops_weak_keypoints() {
        let mut weak = kp("rightHip", 3.0, 3.0);
        weak.confidence = 0.1;
        let result = PoseResult::single(vec![kp("leftHip", 2.0, 2.0), weak]);
        let extractor = PoseExtractor::new(PoseExtractorParams {
            min_confidence: 0.5,
        });
        let quad = extractor.extract(&result);
        assert_eq!(quad.left_hip(), Point2D::new(2.0, 2.0));
        assert_eq!(quad.right_hip(), Point2D::ORIGIN);
    }
}
