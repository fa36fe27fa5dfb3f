//! Hooks for watching an evaluation fold by fold.
use crate::data_handling::Labels;

/// Everything known about a fold once it has been scored.
#[derive(Debug, Clone, Copy)]
pub struct FoldRecord<'a> {
    pub run: usize,
    pub fold: usize,
    pub train_indices: &'a [usize],
    pub test_indices: &'a [usize],
    pub predicted: &'a Labels,
    pub ground_truth: &'a Labels,
    pub score: f64,
}

/// Receives progress callbacks from `MachineEvaluation::evaluate_with_observer`.
///
/// Callbacks only fire for work that completed; an aborted evaluation stops
/// calling the observer at the failing fold.
pub trait EvaluationObserver {
    fn on_evaluation_start(&mut self, _num_runs: usize, _num_folds: usize) {}

    fn on_run_start(&mut self, _run: usize) {}

    fn on_fold(&mut self, _record: &FoldRecord<'_>) {}

    fn on_run_end(&mut self, _run: usize, _score: f64) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {}

/// Writes each fold and run score through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FoldLogger;

impl EvaluationObserver for FoldLogger {
    fn on_evaluation_start(&mut self, num_runs: usize, num_folds: usize) {
        log::info!(
            "Evaluating {} run(s) of {} fold(s)",
            num_runs,
            num_folds
        );
    }

    fn on_fold(&mut self, record: &FoldRecord<'_>) {
        log::info!(
            "Run {} fold {}: trained on {} examples, tested on {}, score {:.6}",
            record.run,
            record.fold,
            record.train_indices.len(),
            record.test_indices.len(),
            record.score
        );
    }

    fn on_run_end(&mut self, run: usize, score: f64) {
        log::info!("Run {} score {:.6}", run, score);
    }
}

/// Keeps every fold score and run score for later inspection.
#[derive(Debug, Default, Clone)]
pub struct ScoreTrace {
    fold_scores: Vec<Vec<f64>>,
    run_scores: Vec<f64>,
}

impl ScoreTrace {
    pub fn new() -> Self {
        ScoreTrace::default()
    }

    /// Fold scores grouped by run.
    pub fn fold_scores(&self) -> &[Vec<f64>] {
        &self.fold_scores
    }

    pub fn run_scores(&self) -> &[f64] {
        &self.run_scores
    }

    pub fn num_folds_evaluated(&self) -> usize {
        self.fold_scores.iter().map(Vec::len).sum()
    }
}

impl EvaluationObserver for ScoreTrace {
    fn on_evaluation_start(&mut self, _num_runs: usize, _num_folds: usize) {
        self.fold_scores.clear();
        self.run_scores.clear();
    }

    fn on_run_start(&mut self, _run: usize) {
        self.fold_scores.push(Vec::new());
    }

    fn on_fold(&mut self, record: &FoldRecord<'_>) {
        if let Some(run) = self.fold_scores.last_mut() {
            run.push(record.score);
        }
    }

    fn on_run_end(&mut self, _run: usize, score: f64) {
        self.run_scores.push(score);
    }
}
