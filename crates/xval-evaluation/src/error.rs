use std::fmt;

use thiserror::Error;

/// The step of a fold in which a collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldStage {
    Train,
    Predict,
    Score,
}

impl fmt::Display for FoldStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FoldStage::Train => write!(f, "training"),
            FoldStage::Predict => write!(f, "prediction"),
            FoldStage::Score => write!(f, "scoring"),
        }
    }
}

/// Errors returned by [`crate::evaluation::MachineEvaluation::evaluate`].
///
/// Run and fold indices are zero-based.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Rejected before any training started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("splitting strategy failed to build a partition for run {run}: {source}")]
    PartitionFailed {
        run: usize,
        #[source]
        source: SplitError,
    },

    #[error("evaluation failed in run {run}, fold {fold} during {stage}: {source}")]
    EvaluationFailed {
        run: usize,
        fold: usize,
        stage: FoldStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to aggregate run scores: {0}")]
    Aggregation(#[source] anyhow::Error),
}

impl EvaluationError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        EvaluationError::InvalidConfiguration(msg.into())
    }

    /// True when a fold failed because the criterion saw label sequences of
    /// different lengths.
    pub fn is_length_mismatch(&self) -> bool {
        match self {
            EvaluationError::EvaluationFailed { source, .. } => matches!(
                source.downcast_ref::<CriterionError>(),
                Some(CriterionError::LengthMismatch { .. })
            ),
            _ => false,
        }
    }

    /// `(run, fold)` of the failing fold, if the error originated in one.
    pub fn failed_fold(&self) -> Option<(usize, usize)> {
        match self {
            EvaluationError::EvaluationFailed { run, fold, .. } => Some((*run, *fold)),
            _ => None,
        }
    }
}

/// Errors produced by splitting strategies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("{strategy} needs at least {needed} examples, got {available}")]
    TooFewExamples {
        strategy: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("fold {fold} references index {index}, but the dataset has {len} examples")]
    IndexOutOfRange { fold: usize, index: usize, len: usize },

    #[error("strategy was built for {expected} examples, dataset has {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Errors produced by evaluation criteria.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriterionError {
    #[error("predicted labels ({predicted}) and ground truth ({ground_truth}) differ in length")]
    LengthMismatch { predicted: usize, ground_truth: usize },

    #[error("cannot score an empty label set")]
    Empty,
}
