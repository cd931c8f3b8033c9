use crate::compositor::CompositorParams;
use crate::garment::{GarmentParams, GarmentSource};
use crate::pose::PoseExtractorParams;
use crate::types::RawLandmarkSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Landmarks as shipped next to a garment image.
#[derive(Clone, Debug, Deserialize)]
pub struct LandmarkInput {
    pub values: Vec<f32>,
    /// Values are in [0, 1] and must be scaled by the image size.
    #[serde(default)]
    pub normalized: bool,
}

impl LandmarkInput {
    pub fn resolve(&self, width: usize, height: usize) -> RawLandmarkSet {
        if self.normalized {
            RawLandmarkSet::from_normalized(&self.values, width as u32, height as u32)
        } else {
            RawLandmarkSet::new(self.values.clone())
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TryOnInputConfig {
    pub garment_image: PathBuf,
    pub landmarks: LandmarkInput,
    /// Optional pre-segmented variant of `garment_image` on black.
    #[serde(default)]
    pub segmented_image: Option<PathBuf>,
    pub frame_image: PathBuf,
    /// Pose result JSON (`allPoses` / `keypoints` shape).
    pub pose_json: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TryOnOutputConfig {
    pub composite_png: PathBuf,
    #[serde(default)]
    pub canvas_png: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TryOnDemoConfig {
    pub input: TryOnInputConfig,
    #[serde(default)]
    pub garment: GarmentParams,
    #[serde(default)]
    pub garment_source: GarmentSource,
    #[serde(default)]
    pub pose: PoseExtractorParams,
    #[serde(default)]
    pub compositor: CompositorParams,
    pub output: TryOnOutputConfig,
}

pub fn load_config(path: &Path) -> Result<TryOnDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{
            "input": {
                "garment_image": "shirt.png",
                "landmarks": { "values": [0.5, 0.25] , "normalized": true },
                "frame_image": "frame.png",
                "pose_json": "pose.json"
            },
            "output": { "composite_png": "out.png" }
        }"#;
        let cfg: TryOnDemoConfig = serde_json::from_str(json).expect("minimal config");
        assert_eq!(cfg.garment, GarmentParams::default());
        assert_eq!(cfg.garment_source, GarmentSource::Original);
        assert!(cfg.output.report_json.is_none());
        let lm = cfg.input.landmarks.resolve(200, 400);
        assert_eq!(lm.values, vec![100.0, 100.0]);
    }
}
