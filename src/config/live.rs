use crate::compositor::CompositorParams;
use crate::garment::GarmentParams;
use crate::pose::PoseExtractorParams;
use crate::runtime::LoopParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the synthetic live loop.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LiveDemoConfig {
    pub frame_width: usize,
    pub frame_height: usize,
    /// Frames produced by the synthetic camera before it ends.
    pub frame_count: u64,
    /// Frame index at which a second garment replaces the first.
    pub swap_garment_at: Option<u64>,
    /// Every presented frame is written here as `frame_NNNN.png` when set.
    pub output_dir: Option<PathBuf>,
    pub stats_json: Option<PathBuf>,
    #[serde(rename = "loop")]
    pub loop_params: LoopParams,
    pub garment: GarmentParams,
    pub pose: PoseExtractorParams,
    pub compositor: CompositorParams,
}

impl Default for LiveDemoConfig {
    fn default() -> Self {
        Self {
            frame_width: 320,
            frame_height: 240,
            frame_count: 60,
            swap_garment_at: Some(30),
            output_dir: None,
            stats_json: None,
            loop_params: LoopParams::default(),
            garment: GarmentParams::default(),
            pose: PoseExtractorParams::default(),
            compositor: CompositorParams::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<LiveDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_section_is_renamed() {
        let cfg: LiveDemoConfig =
            serde_json::from_str(r#"{ "loop": { "target_fps": 12.5 }, "frame_count": 5 }"#)
                .expect("partial config");
        assert_eq!(cfg.loop_params.target_fps, 12.5);
        assert_eq!(cfg.frame_count, 5);
        assert_eq!(cfg.frame_width, 320);
    }
}
