//! Reduction of per-run direction scores into the preference statistic.

use gnn_core::{Preference, PredictError};
use serde::Serialize;
use tracing::warn;

/// Both direction scores of one run. Lower scores mean a better fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunResult {
    pub run: usize,
    /// Device the run was pinned to, if any.
    pub device: Option<usize>,
    /// Score of the model generating B from A.
    pub score_ab: f64,
    /// Score of the model generating A from B.
    pub score_ba: f64,
}

impl RunResult {
    pub fn is_finite(&self) -> bool {
        self.score_ab.is_finite() && self.score_ba.is_finite()
    }
}

/// Per-direction means over all runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionMeans {
    pub mean_ab: f64,
    pub mean_ba: f64,
}

impl DirectionMeans {
    /// `(mean_ba - mean_ab) / (mean_ba + mean_ab)`.
    ///
    /// A zero denominator is reported instead of producing a non-finite
    /// value. Non-finite means propagate into the result.
    pub fn preference(&self) -> Result<Preference, PredictError> {
        let denominator = self.mean_ba + self.mean_ab;
        if denominator == 0.0 {
            return Err(PredictError::DegenerateScores {
                mean_ab: self.mean_ab,
                mean_ba: self.mean_ba,
            });
        }
        Ok(Preference((self.mean_ba - self.mean_ab) / denominator))
    }
}

/// Means of each direction's scores. `None` when `runs` is empty.
///
/// Non-finite run scores are logged and kept, so they surface in the means.
pub fn mean_scores(runs: &[RunResult]) -> Option<DirectionMeans> {
    if runs.is_empty() {
        return None;
    }
    for r in runs.iter().filter(|r| !r.is_finite()) {
        warn!(
            run = r.run,
            score_ab = r.score_ab,
            score_ba = r.score_ba,
            "non-finite direction score"
        );
    }
    let n = runs.len() as f64;
    let mean_ab = runs.iter().map(|r| r.score_ab).sum::<f64>() / n;
    let mean_ba = runs.iter().map(|r| r.score_ba).sum::<f64>() / n;
    Some(DirectionMeans { mean_ab, mean_ba })
}

/// Means and preference for a completed set of runs.
pub fn aggregate(runs: &[RunResult]) -> Result<(DirectionMeans, Preference), PredictError> {
    let means = mean_scores(runs).ok_or(PredictError::DegenerateScores {
        mean_ab: f64::NAN,
        mean_ba: f64::NAN,
    })?;
    let preference = means.preference()?;
    Ok((means, preference))
}
