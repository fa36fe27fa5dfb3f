use crate::config::EvaluationConfig;
use crate::criterion::Direction;
use crate::error::EvaluationError;
use crate::evaluation::result::EvaluationResult;
use crate::stats::{self, confidence_interval};

/// Turn run-level scores into the final result.
///
/// Fold scores have already been combined per run by the criterion, so the
/// estimate is the mean over runs (fold-then-run averaging). An interval is
/// only produced for more than one run and an alpha in (0, 1).
pub fn aggregate_runs(
    run_scores: Vec<f64>,
    config: &EvaluationConfig,
    direction: Direction,
) -> Result<EvaluationResult, EvaluationError> {
    if run_scores.is_empty() {
        return Err(EvaluationError::invalid("no run scores to aggregate"));
    }

    let mean = stats::mean(&run_scores);
    let conf_int = match config.interval_alpha() {
        Some(alpha) if run_scores.len() > 1 => Some(
            confidence_interval(&run_scores, alpha, config.interval_method)
                .map_err(EvaluationError::Aggregation)?,
        ),
        _ => None,
    };

    Ok(EvaluationResult::new(mean, conf_int, run_scores, direction))
}
