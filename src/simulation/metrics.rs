//! Metrics accumulated by a simulation run.

use serde::{Deserialize, Serialize};

/// Metrics for one simulation run, all in `[0, 1]`.
///
/// The engine is the sole writer; the UI reads shared copies during a run
/// for progress display. Within one run, `ctr` and `reply_rate` are
/// non-decreasing at every observed tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Click-through rate.
    pub ctr: f64,
    /// Reply rate.
    pub reply_rate: f64,
    /// Composite score derived from the other two.
    pub automation_score: f64,
}

impl SimulationMetrics {
    /// Apply one tick's increments, capped at 1.0, and recompute the
    /// composite score.
    pub(crate) fn bump(&mut self, ctr_delta: f64, reply_delta: f64) {
        self.ctr = (self.ctr + ctr_delta).min(1.0);
        self.reply_rate = (self.reply_rate + reply_delta).min(1.0);
        self.automation_score = (self.ctr + self.reply_rate) / 2.0;
    }
}
