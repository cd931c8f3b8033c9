use async_trait::async_trait;
use garment_tryon::compositor::CompositedFrame;
use garment_tryon::diagnostics::FrameReport;
use garment_tryon::image::Rgba8Image;
use garment_tryon::runtime::{
    FrameSink, FrameSource, GarmentLandmarkProvider, LandmarkResponse, PoseProvider,
    PoseProviderConfig,
};
use garment_tryon::types::{PoseResult, RawLandmarkSet};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Plays back a fixed list of frames, then ends.
pub struct VecSource {
    frames: VecDeque<Rgba8Image>,
}

impl VecSource {
    pub fn repeat(frame: Rgba8Image, count: usize) -> Self {
        Self {
            frames: std::iter::repeat(frame).take(count).collect(),
        }
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Option<Rgba8Image> {
        self.frames.pop_front()
    }
}

/// Keeps every presented frame.
#[derive(Default)]
pub struct RecordingSink {
    pub presented: Vec<(CompositedFrame, FrameReport)>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: CompositedFrame, report: &FrameReport) {
        self.presented.push((frame, report.clone()));
    }
}

/// Outcome of one scripted pose call.
#[derive(Clone)]
pub enum Step {
    Pose(PoseResult),
    Fail(&'static str),
    /// Never completes.
    Hang,
}

/// Replays `steps` cyclically, optionally after a delay, and tracks how many
/// calls were in flight at once.
pub struct ScriptedPose {
    steps: Vec<Step>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedPose {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps,
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn always(pose: PoseResult) -> Self {
        Self::new(vec![Step::Pose(pose)])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl PoseProvider for ScriptedPose {
    async fn estimate(
        &self,
        _frame: &Rgba8Image,
        _config: &PoseProviderConfig,
    ) -> Result<PoseResult, String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let step = self.steps[n % self.steps.len()].clone();
        let out = match step {
            Step::Pose(pose) => Ok(pose),
            Step::Fail(msg) => Err(msg.to_string()),
            Step::Hang => std::future::pending().await,
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Landmark service that answers uploads from a queue, then fails.
pub struct ScriptedLandmarks {
    replies: Mutex<VecDeque<Result<LandmarkResponse, String>>>,
}

impl ScriptedLandmarks {
    pub fn new(replies: Vec<Result<LandmarkResponse, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }

    /// Queue landmarks for one upload, without a segmented variant.
    pub fn landmarks(set: RawLandmarkSet) -> Result<LandmarkResponse, String> {
        Ok(LandmarkResponse {
            landmarks: set,
            segmented: None,
        })
    }
}

#[async_trait]
impl GarmentLandmarkProvider for ScriptedLandmarks {
    async fn detect(&self, _encoded: &[u8]) -> Result<LandmarkResponse, String> {
        self.replies
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()))
    }

    fn name(&self) -> &'static str {
        "scripted-landmarks"
    }
}
