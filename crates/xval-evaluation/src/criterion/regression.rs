use crate::criterion::{check_lengths, Criterion, Direction};
use crate::data_handling::Labels;
use crate::error::CriterionError;

/// Mean of squared residuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl Criterion for MeanSquaredError {
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError> {
        let n = check_lengths(predicted, ground_truth)?;
        let sse: f64 = predicted
            .iter()
            .zip(ground_truth.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        Ok(sse / n as f64)
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn name(&self) -> &str {
        "mean squared error"
    }
}

/// Mean of absolute residuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsoluteError;

impl Criterion for MeanAbsoluteError {
    fn evaluate(&self, predicted: &Labels, ground_truth: &Labels) -> Result<f64, CriterionError> {
        let n = check_lengths(predicted, ground_truth)?;
        let sae: f64 = predicted
            .iter()
            .zip(ground_truth.iter())
            .map(|(p, t)| (p - t).abs())
            .sum();
        Ok(sae / n as f64)
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn name(&self) -> &str {
        "mean absolute error"
    }
}
