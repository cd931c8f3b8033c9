use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Timing entry for a single stage of frame processing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings collected while processing one frame or upload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Record the time since `start` under `label` and restart the clock.
    pub fn lap(&mut self, label: impl Into<String>, start: &mut Instant) {
        self.push(label, elapsed_ms(*start));
        *start = Instant::now();
    }

    /// Append `other`'s stages (not its total).
    pub fn extend(&mut self, other: TimingBreakdown) {
        self.stages.extend(other.stages);
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_looked_up_by_label() {
        let mut t = TimingBreakdown::default();
        t.push("warp", 1.5);
        t.push("blend", 0.25);
        assert_eq!(t.stage_ms("blend"), Some(0.25));
        assert_eq!(t.stage_ms("solve"), None);
    }

    #[test]
    fn lap_restarts_the_clock() {
        let mut t = TimingBreakdown::default();
        let mut start = Instant::now() - std::time::Duration::from_millis(5);
        t.lap("first", &mut start);
        assert!(t.stage_ms("first").expect("recorded") >= 5.0);
        assert!(elapsed_ms(start) < 5.0);
    }
}
