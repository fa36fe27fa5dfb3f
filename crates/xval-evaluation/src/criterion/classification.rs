use crate::criterion::{check_lengths, Criterion, Direction};
use crate::data_handling::Labels;
use crate::error::CriterionError;

fn count_matches(predicted: &Labels, ground_truth: &Labels) -> usize {
    predicted
        .iter()
        .zip(ground_truth.iter())
        .filter(|(p, t)| p == t)
        .count()
}

/// Fraction of predictions equal to the true class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl Criterion for Accuracy {
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError> {
        let n = check_lengths(predicted, ground_truth)?;
        Ok(count_matches(predicted, ground_truth) as f64 / n as f64)
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn name(&self) -> &str {
        "accuracy"
    }
}

/// Fraction of predictions differing from the true class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorRate;

impl Criterion for ErrorRate {
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError> {
        let n = check_lengths(predicted, ground_truth)?;
        Ok(1.0 - count_matches(predicted, ground_truth) as f64 / n as f64)
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn name(&self) -> &str {
        "error rate"
    }
}
