//! Live runtime: collaborators, the active-garment slot, uploads and the
//! per-frame loop.
//!
//! ```no_run
//! use garment_tryon::runtime::{FrameLoop, GarmentSlot, LoopParams};
//! # use garment_tryon::runtime::{FrameSink, FrameSource, PoseProvider};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example<S: FrameSource, P: PoseProvider, K: FrameSink>(source: S, provider: P, sink: K) {
//! let slot = GarmentSlot::new();
//! let mut frame_loop = FrameLoop::new(source, provider, sink, slot.subscribe(), LoopParams::default());
//! let stats = frame_loop.run(CancellationToken::new()).await;
//! println!("{} frames, {} with overlay", stats.frames_presented, stats.overlays_drawn);
//! # }
//! ```

pub mod frame_loop;
pub mod garment_slot;
pub mod providers;
pub mod upload;

pub use frame_loop::{FrameLoop, LoopParams, TickOutcome};
pub use garment_slot::{GarmentReader, GarmentSlot, SharedProfile};
pub use providers::{
    FrameSink, FrameSource, GarmentLandmarkProvider, LandmarkResponse, PoseProvider,
    PoseProviderConfig, ResolutionTier,
};
pub use upload::{prepare_from_response, GarmentUploader, UploadError};
