//! Diagnostics data model shared by the compositor, the frame loop and demos.
//!
//! `FrameReport` accompanies every presented frame; `LoopStats` summarises a
//! whole run. Both are plain serde structs so demos can dump them as JSON.

pub mod frame;
pub mod timing;

pub use frame::{FrameReport, LoopStats, OverlayStatus};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
