//! Scoring functions comparing predictions with ground truth.
use serde::{Deserialize, Serialize};

use crate::data_handling::Labels;
use crate::error::CriterionError;
use crate::stats;

pub mod classification;
pub mod regression;

pub use classification::{Accuracy, ErrorRate};
pub use regression::{MeanAbsoluteError, MeanSquaredError};

/// Which end of a criterion's range is better.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    /// Whether `candidate` is strictly better than `reference`.
    pub fn is_better(&self, candidate: f64, reference: f64) -> bool {
        match self {
            Direction::Maximize => candidate > reference,
            Direction::Minimize => candidate < reference,
        }
    }
}

/// A stateless scoring function with a fixed direction.
pub trait Criterion {
    /// Score `predicted` against `ground_truth`. Both must have equal length.
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError>;

    fn direction(&self) -> Direction;

    /// Combine the fold scores of one run into the run score.
    fn combine(&self, fold_scores: &[f64]) -> f64 {
        stats::mean(fold_scores)
    }

    fn name(&self) -> &str {
        "criterion"
    }
}

impl<C: Criterion + ?Sized> Criterion for Box<C> {
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError> {
        (**self).evaluate(predicted, ground_truth)
    }

    fn direction(&self) -> Direction {
        (**self).direction()
    }

    fn combine(&self, fold_scores: &[f64]) -> f64 {
        (**self).combine(fold_scores)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Shared length validation; returns the common, non-zero length.
pub(crate) fn check_lengths(
    predicted: &Labels,
    ground_truth: &Labels,
) -> Result<usize, CriterionError> {
    if predicted.len() != ground_truth.len() {
        return Err(CriterionError::LengthMismatch {
            predicted: predicted.len(),
            ground_truth: ground_truth.len(),
        });
    }
    if predicted.is_empty() {
        return Err(CriterionError::Empty);
    }
    Ok(predicted.len())
}
