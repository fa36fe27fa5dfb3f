use anyhow::anyhow;

use crate::config::EvaluationConfig;
use crate::criterion::{Criterion, Direction};
use crate::data_handling::{Dataset, Features, Labels};
use crate::error::{EvaluationError, FoldStage, SplitError};
use crate::evaluation::aggregate::aggregate_runs;
use crate::evaluation::lock::LockGuard;
use crate::evaluation::observer::{EvaluationObserver, FoldRecord, NoopObserver};
use crate::evaluation::result::EvaluationResult;
use crate::models::Machine;
use crate::splitting::SplittingStrategy;
use crate::stats::IntervalMethod;

/// Estimates how well a machine generalizes by repeated cross-validation.
///
/// Each call to [`MachineEvaluation::evaluate`] is an independent session:
/// the splitting strategy is asked for a fresh partition plan per run, the
/// machine is trained and scored on every fold, and the run scores are
/// aggregated into an [`EvaluationResult`]. After a successful call the machine
/// holds the parameters learned on the last fold of the last run.
pub struct MachineEvaluation<M: Machine> {
    machine: M,
    data: Dataset,
    splitting: Box<dyn SplittingStrategy>,
    criterion: Box<dyn Criterion>,
    config: EvaluationConfig,
}

impl<M: Machine> MachineEvaluation<M> {
    /// Create an evaluation over a feature matrix and its labels.
    ///
    /// # Arguments
    ///
    /// * `machine` - The machine to evaluate; owned by the engine until `into_machine`
    /// * `features` - One row per example
    /// * `labels` - One label per example
    /// * `splitting` - Produces the train/test folds of every run
    /// * `criterion` - Scores predictions against the held-out labels
    /// * `autolock` - Lock the machine for the duration of `evaluate` when it supports locking
    ///
    /// # Returns
    ///
    /// An engine configured for a single run without a confidence interval.
    pub fn new(
        machine: M,
        features: Features,
        labels: Labels,
        splitting: impl SplittingStrategy + 'static,
        criterion: impl Criterion + 'static,
        autolock: bool,
    ) -> Self {
        Self::from_dataset(
            machine,
            Dataset::new(features, labels),
            splitting,
            criterion,
            autolock,
        )
    }

    /// Create an evaluation without features, for machines built on a
    /// precomputed relation over the examples. Folds are built from the
    /// number of labels and the machine never gets locked.
    pub fn with_labels_only(
        machine: M,
        labels: Labels,
        splitting: impl SplittingStrategy + 'static,
        criterion: impl Criterion + 'static,
        autolock: bool,
    ) -> Self {
        Self::from_dataset(
            machine,
            Dataset::labels_only(labels),
            splitting,
            criterion,
            autolock,
        )
    }

    fn from_dataset(
        machine: M,
        data: Dataset,
        splitting: impl SplittingStrategy + 'static,
        criterion: impl Criterion + 'static,
        autolock: bool,
    ) -> Self {
        MachineEvaluation {
            machine,
            data,
            splitting: Box::new(splitting),
            criterion: Box::new(criterion),
            config: EvaluationConfig {
                autolock,
                ..EvaluationConfig::default()
            },
        }
    }

    /// Replace the whole session configuration, autolock flag included.
    pub fn with_config(mut self, config: EvaluationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Takes effect on the next call to `evaluate`.
    pub fn set_autolock(&mut self, autolock: bool) {
        self.config.autolock = autolock;
    }

    pub fn set_num_runs(&mut self, num_runs: usize) {
        self.config.num_runs = num_runs;
    }

    /// `None` or `Some(0.0)` disables the confidence interval.
    pub fn set_conf_int_alpha(&mut self, alpha: Option<f64>) {
        self.config.conf_int_alpha = alpha;
    }

    pub fn set_interval_method(&mut self, method: IntervalMethod) {
        self.config.interval_method = method;
    }

    /// Direction in which the criterion's scores improve.
    pub fn get_evaluation_direction(&self) -> Direction {
        self.criterion.direction()
    }

    pub fn get_machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    pub fn into_machine(self) -> M {
        self.machine
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Run the configured number of cross-validation runs and aggregate them.
    pub fn evaluate(&mut self) -> Result<EvaluationResult, EvaluationError> {
        self.evaluate_with_observer(&mut NoopObserver)
    }

    /// Same as [`MachineEvaluation::evaluate`], reporting progress to `observer`.
    pub fn evaluate_with_observer(
        &mut self,
        observer: &mut dyn EvaluationObserver,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.validate()?;

        let num_runs = self.config.num_runs;
        let direction = self.criterion.direction();
        log::info!(
            "Evaluating {} on {} examples: {} run(s) of {} ({} subsets), criterion {}",
            self.machine.name(),
            self.data.num_examples(),
            num_runs,
            self.splitting.name(),
            self.splitting.num_subsets(),
            self.criterion.name()
        );
        observer.on_evaluation_start(num_runs, self.splitting.num_subsets());

        let mut machine = LockGuard::acquire(&mut self.machine, &self.data, self.config.autolock);
        let locked = machine.is_locked();
        log::debug!(
            "Training {} (engine owns lock: {})",
            if locked { "by index on the locked data" } else { "on materialized views" },
            machine.owns_lock()
        );

        let mut run_scores = Vec::with_capacity(num_runs);
        for run in 0..num_runs {
            observer.on_run_start(run);
            let score = evaluate_run(
                run,
                &mut *machine,
                locked,
                self.splitting.as_mut(),
                self.criterion.as_ref(),
                &self.data,
                observer,
            )?;
            log::debug!("Run {} score: {:.6}", run, score);
            observer.on_run_end(run, score);
            run_scores.push(score);
        }

        drop(machine);

        let result = aggregate_runs(run_scores, &self.config, direction)?;
        log::info!("Evaluation of {} finished: {}", self.machine.name(), result);
        Ok(result)
    }

    /// Eager checks; nothing is trained when one of them fails.
    fn validate(&self) -> Result<(), EvaluationError> {
        self.config.validate()?;
        self.data.validate()?;

        if self.splitting.requires_features() && !self.data.has_features() {
            return Err(EvaluationError::invalid(format!(
                "{} requires features but none were provided",
                self.splitting.name()
            )));
        }
        self.splitting
            .check(self.data.num_examples())
            .map_err(|e| EvaluationError::invalid(e.to_string()))
    }
}

/// One run: a fresh plan, every fold in plan order, then the criterion's
/// combination of the fold scores.
fn evaluate_run<M: Machine + ?Sized>(
    run: usize,
    machine: &mut M,
    locked: bool,
    splitting: &mut dyn SplittingStrategy,
    criterion: &dyn Criterion,
    data: &Dataset,
    observer: &mut dyn EvaluationObserver,
) -> Result<f64, EvaluationError> {
    let plan = splitting
        .build_subsets(data)
        .map_err(|source| EvaluationError::PartitionFailed { run, source })?;
    if plan.is_empty() {
        return Err(EvaluationError::PartitionFailed {
            run,
            source: SplitError::InvalidParameter(format!(
                "{} produced an empty plan",
                splitting.name()
            )),
        });
    }
    plan.check_bounds(data.num_examples())
        .map_err(|source| EvaluationError::PartitionFailed { run, source })?;

    let mut fold_scores = Vec::with_capacity(plan.len());
    for (fold_idx, fold) in plan.iter().enumerate() {
        let failed = move |stage: FoldStage| {
            move |source: anyhow::Error| EvaluationError::EvaluationFailed {
                run,
                fold: fold_idx,
                stage,
                source,
            }
        };

        let train_view = data.view(&fold.train);
        let test_view = data.view(&fold.test);

        let trained = if locked {
            machine.train_locked(&fold.train)
        } else {
            machine.train(&train_view)
        };
        trained.map_err(failed(FoldStage::Train))?;

        let predicted = if locked {
            machine.predict_locked(&fold.test)
        } else {
            machine.predict(&test_view)
        }
        .map_err(failed(FoldStage::Predict))?;

        let ground_truth = test_view.labels();
        let score = criterion
            .evaluate(&predicted, &ground_truth)
            .map_err(|e| failed(FoldStage::Score)(e.into()))?;
        if !score.is_finite() {
            return Err(failed(FoldStage::Score)(anyhow!(
                "{} produced a non-finite score: {}",
                criterion.name(),
                score
            )));
        }

        log::trace!(
            "Run {} fold {}: train {} / test {}, score {:.6}",
            run,
            fold_idx,
            fold.train.len(),
            fold.test.len(),
            score
        );
        observer.on_fold(&FoldRecord {
            run,
            fold: fold_idx,
            train_indices: &fold.train,
            test_indices: &fold.test,
            predicted: &predicted,
            ground_truth: &ground_truth,
            score,
        });
        fold_scores.push(score);
    }

    Ok(criterion.combine(&fold_scores))
}
