//! Collaborator interfaces around the core pipeline.
//!
//! Capture, pose inference, garment landmark detection and display live
//! outside this crate; the frame loop and the upload flow only see these
//! traits. Inference-bound collaborators are async so they can suspend the
//! loop; capture and display are synchronous.
use crate::compositor::CompositedFrame;
use crate::diagnostics::FrameReport;
use crate::image::Rgba8Image;
use crate::types::{PoseResult, RawLandmarkSet};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Input resolution the pose model runs at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Fixed configuration passed with every pose request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseProviderConfig {
    pub detection_threshold: f32,
    /// Mirror the input before inference (selfie cameras).
    pub flip_horizontal: bool,
    pub resolution: ResolutionTier,
    /// Only the first pose is used, so providers are asked for one.
    pub max_detections: u32,
}

impl Default for PoseProviderConfig {
    fn default() -> Self {
        Self {
            detection_threshold: 0.5,
            flip_horizontal: true,
            resolution: ResolutionTier::Medium,
            max_detections: 1,
        }
    }
}

/// Pose estimation model, called once per frame.
#[async_trait]
pub trait PoseProvider: Send + Sync {
    async fn estimate(
        &self,
        frame: &Rgba8Image,
        config: &PoseProviderConfig,
    ) -> Result<PoseResult, String>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Camera side of the loop. `None` means the stream has ended.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Option<Rgba8Image>;
}

/// Display side of the loop.
pub trait FrameSink: Send {
    fn present(&mut self, frame: CompositedFrame, report: &FrameReport);
}

/// What the garment landmark service returns for one upload.
#[derive(Clone, Debug, Default)]
pub struct LandmarkResponse {
    /// Landmarks in the pixel space of the uploaded image.
    pub landmarks: RawLandmarkSet,
    /// Pre-segmented variant on a black background, same size as the upload.
    pub segmented: Option<Rgba8Image>,
}

/// External garment landmark detection.
#[async_trait]
pub trait GarmentLandmarkProvider: Send + Sync {
    async fn detect(&self, encoded: &[u8]) -> Result<LandmarkResponse, String>;

    fn name(&self) -> &'static str;
}
