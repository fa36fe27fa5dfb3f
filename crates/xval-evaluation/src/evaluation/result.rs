use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criterion::Direction;
use crate::stats::ConfidenceInterval;

/// Outcome of one `evaluate()` call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    mean: f64,
    conf_int: Option<ConfidenceInterval>,
    run_scores: Vec<f64>,
    direction: Direction,
}

impl EvaluationResult {
    pub(crate) fn new(
        mean: f64,
        conf_int: Option<ConfidenceInterval>,
        run_scores: Vec<f64>,
        direction: Direction,
    ) -> Self {
        EvaluationResult {
            mean,
            conf_int,
            run_scores,
            direction,
        }
    }

    /// Point estimate: the mean of the run scores.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn has_conf_int(&self) -> bool {
        self.conf_int.is_some()
    }

    pub fn conf_int(&self) -> Option<&ConfidenceInterval> {
        self.conf_int.as_ref()
    }

    pub fn conf_int_low(&self) -> Option<f64> {
        self.conf_int.map(|ci| ci.lower)
    }

    pub fn conf_int_up(&self) -> Option<f64> {
        self.conf_int.map(|ci| ci.upper)
    }

    /// Confidence level `1 - alpha` of the interval.
    pub fn conf_level(&self) -> Option<f64> {
        self.conf_int.map(|ci| ci.level)
    }

    /// Run-level scores in run order.
    pub fn run_scores(&self) -> &[f64] {
        &self.run_scores
    }

    pub fn num_runs(&self) -> usize {
        self.run_scores.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether this result's estimate beats `other`'s under this result's
    /// evaluation direction.
    pub fn is_better_than(&self, other: &EvaluationResult) -> bool {
        self.direction.is_better(self.mean, other.mean)
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.mean)?;
        if let Some(ci) = &self.conf_int {
            write!(
                f,
                " [{:.6}, {:.6}] ({:.1}% confidence)",
                ci.lower,
                ci.upper,
                ci.level * 100.0
            )?;
        }
        Ok(())
    }
}
