use super::timing::TimingBreakdown;
use crate::error::TryOnError;
use crate::types::BodyQuad;
use serde::Serialize;

/// What happened to the garment overlay on one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverlayStatus {
    /// Warped garment was blended onto the frame.
    Drawn,
    /// No garment is loaded; frame shown as captured.
    NoGarment,
    /// Pose inference failed; frame shown as captured.
    PoseUnavailable { reason: String },
    /// Geometry was unusable for this frame; frame shown as captured.
    Skipped { reason: String },
}

impl OverlayStatus {
    pub fn skipped(err: &TryOnError) -> Self {
        OverlayStatus::Skipped {
            reason: err.to_string(),
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, OverlayStatus::Drawn)
    }
}

/// Per-frame record handed to the frame sink next to the pixels.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub width: usize,
    pub height: usize,
    pub body_quad: Option<BodyQuad>,
    pub overlay: OverlayStatus,
    pub timings: TimingBreakdown,
}

/// Counters accumulated by the frame loop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    pub frames_presented: u64,
    pub overlays_drawn: u64,
    pub overlays_skipped: u64,
    pub frames_without_garment: u64,
    pub inference_failures: u64,
    /// Loop triggers that fired while an iteration was still in flight.
    pub triggers_dropped: u64,
}

impl LoopStats {
    pub fn record(&mut self, overlay: &OverlayStatus) {
        self.frames_presented += 1;
        match overlay {
            OverlayStatus::Drawn => self.overlays_drawn += 1,
            OverlayStatus::NoGarment => self.frames_without_garment += 1,
            OverlayStatus::PoseUnavailable { .. } => self.inference_failures += 1,
            OverlayStatus::Skipped { .. } => self.overlays_skipped += 1,
        }
    }
}
