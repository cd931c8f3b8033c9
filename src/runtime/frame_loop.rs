//! Cooperative per-frame loop: capture, infer, extract, composite, present.
//!
//! One loop owns one stream. Pose inference is the only await point, and
//! [`FrameLoop::tick`] takes `&mut self`, so a second inference for the same
//! stream cannot start while one is outstanding. Triggers that fire during a
//! slow iteration are skipped, not queued.
use super::garment_slot::GarmentReader;
use super::providers::{FrameSink, FrameSource, PoseProvider, PoseProviderConfig};
use crate::compositor::PerspectiveCompositor;
use crate::diagnostics::{elapsed_ms, FrameReport, LoopStats, OverlayStatus, TimingBreakdown};
use crate::pose::PoseExtractor;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopParams {
    pub target_fps: f64,
    /// Stop after this many presented frames.
    pub max_frames: Option<u64>,
    pub provider: PoseProviderConfig,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            target_fps: 30.0,
            max_frames: None,
            provider: PoseProviderConfig::default(),
        }
    }
}

impl LoopParams {
    fn period(&self) -> Duration {
        if self.target_fps.is_finite() && self.target_fps > 0.0 {
            Duration::from_secs_f64(1.0 / self.target_fps)
        } else {
            Duration::from_secs_f64(1.0 / LoopParams::default().target_fps)
        }
    }
}

#[derive(Clone, Debug)]
pub enum TickOutcome {
    Presented(FrameReport),
    EndOfStream,
    /// Stopped before presenting; the in-flight inference was dropped.
    Cancelled,
}

pub struct FrameLoop<S, P, K> {
    source: S,
    provider: P,
    sink: K,
    garment: GarmentReader,
    extractor: PoseExtractor,
    compositor: PerspectiveCompositor,
    params: LoopParams,
    stats: LoopStats,
    next_index: u64,
}

impl<S, P, K> FrameLoop<S, P, K>
where
    S: FrameSource,
    P: PoseProvider,
    K: FrameSink,
{
    pub fn new(source: S, provider: P, sink: K, garment: GarmentReader, params: LoopParams) -> Self {
        Self {
            source,
            provider,
            sink,
            garment,
            extractor: PoseExtractor::default(),
            compositor: PerspectiveCompositor::default(),
            params,
            stats: LoopStats::default(),
            next_index: 0,
        }
    }

    pub fn with_extractor(mut self, extractor: PoseExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_compositor(mut self, compositor: PerspectiveCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Run one iteration. Per-frame failures never escape; they show up in
    /// the report's overlay status.
    pub async fn tick(&mut self, cancel: &CancellationToken) -> TickOutcome {
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mut clock = Instant::now();

        let Some(frame) = self.source.next_frame() else {
            return TickOutcome::EndOfStream;
        };
        timings.lap("capture", &mut clock);

        let pose = tokio::select! {
            biased;
            _ = cancel.cancelled() => return TickOutcome::Cancelled,
            res = self.provider.estimate(&frame, &self.params.provider) => res,
        };
        timings.lap("pose", &mut clock);

        let (width, height) = (frame.w, frame.h);
        let (body_quad, overlay, out) = match pose {
            Err(reason) => {
                warn!("{} failed on frame {}: {reason}", self.provider.name(), self.next_index);
                (None, OverlayStatus::PoseUnavailable { reason }, frame)
            }
            Ok(result) => {
                let body = self.extractor.extract(&result);
                timings.lap("extract", &mut clock);
                // One snapshot per frame: canvas and quad come from the same upload.
                match self.garment.snapshot() {
                    None => (Some(body), OverlayStatus::NoGarment, frame),
                    Some(profile) => {
                        let outcome =
                            self.compositor
                                .composite_profile(&profile, &body, frame.as_view());
                        timings.extend(outcome.timings);
                        (Some(body), outcome.overlay, outcome.frame)
                    }
                }
            }
        };

        if cancel.is_cancelled() {
            return TickOutcome::Cancelled;
        }

        timings.total_ms = elapsed_ms(total);
        let report = FrameReport {
            frame_index: self.next_index,
            width,
            height,
            body_quad,
            overlay,
            timings,
        };
        self.next_index += 1;
        self.stats.record(&report.overlay);
        debug!(
            "frame {}: {:?} in {:.2} ms",
            report.frame_index, report.overlay, report.timings.total_ms
        );
        self.sink.present(out, &report);
        TickOutcome::Presented(report)
    }

    /// Drive [`tick`](Self::tick) at `target_fps` until the stream ends, the
    /// frame limit is reached, or `cancel` fires.
    pub async fn run(&mut self, cancel: CancellationToken) -> LoopStats {
        let period = self.params.period();
        let mut trigger = tokio::time::interval(period);
        trigger.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            "FrameLoop: started ({:.1} fps, provider {})",
            1.0 / period.as_secs_f64(),
            self.provider.name()
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = trigger.tick() => {}
            }

            let started = tokio::time::Instant::now();
            match self.tick(&cancel).await {
                TickOutcome::Presented(_) => {}
                TickOutcome::EndOfStream => {
                    info!("FrameLoop: source ended");
                    break;
                }
                TickOutcome::Cancelled => break,
            }

            let missed = (started.elapsed().as_nanos() / period.as_nanos().max(1)) as u64;
            if missed > 0 {
                debug!("FrameLoop: iteration overran, {missed} trigger(s) dropped");
                self.stats.triggers_dropped += missed;
            }

            if self
                .params
                .max_frames
                .is_some_and(|max| self.stats.frames_presented >= max)
            {
                break;
            }
            tokio::task::yield_now().await;
        }

        info!(
            "FrameLoop: stopped after {} frames ({} with overlay)",
            self.stats.frames_presented, self.stats.overlays_drawn
        );
        self.stats.clone()
    }
}
