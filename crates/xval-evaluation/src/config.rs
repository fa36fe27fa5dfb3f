use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EvaluationError;
use crate::stats::IntervalMethod;

/// Central configuration for an evaluation session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of independent cross-validation repetitions.
    pub num_runs: usize,

    /// Significance level of the confidence interval over runs; `None` or
    /// `0` disables the interval.
    pub conf_int_alpha: Option<f64>,

    /// Lock the machine before evaluating when it supports locking.
    pub autolock: bool,

    /// Distribution the interval's critical value is taken from.
    pub interval_method: IntervalMethod,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            conf_int_alpha: None,
            autolock: true,
            interval_method: IntervalMethod::StudentT,
        }
    }
}

impl EvaluationConfig {
    pub fn new(num_runs: usize, conf_int_alpha: Option<f64>) -> Self {
        Self {
            num_runs,
            conf_int_alpha,
            ..Self::default()
        }
    }

    /// Alpha of the requested interval, or `None` when the interval is
    /// disabled.
    pub fn interval_alpha(&self) -> Option<f64> {
        self.conf_int_alpha.filter(|&alpha| alpha > 0.0 && alpha < 1.0)
    }

    pub fn validate(&self) -> Result<(), EvaluationError> {
        if self.num_runs < 1 {
            return Err(EvaluationError::invalid(format!(
                "num_runs must be at least 1, got {}",
                self.num_runs
            )));
        }
        // 0 disables the interval
        if let Some(alpha) = self.conf_int_alpha.filter(|&alpha| alpha != 0.0) {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(EvaluationError::invalid(format!(
                    "conf_int_alpha must lie in (0, 1), got {}",
                    alpha
                )));
            }
        }
        Ok(())
    }
}

/// Bundled machines and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum MachineConfig {
    KernelRidge { lambda: f64, kernel_width: f64 },
    NearestCentroid,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig::KernelRidge {
            lambda: 1e-3,
            kernel_width: 1.0,
        }
    }
}

impl FromStr for MachineConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kernel_ridge" | "krr" => Ok(MachineConfig::default()),
            "nearest_centroid" => Ok(MachineConfig::NearestCentroid),
            _ => Err(format!(
                "Unknown machine: {}. Valid options are: kernel_ridge, nearest_centroid",
                s
            )),
        }
    }
}

/// Bundled splitting strategies.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum SplittingConfig {
    KFold { num_folds: usize, seed: Option<u64> },
    StratifiedKFold { num_folds: usize, seed: Option<u64> },
    LeaveOneOut { num_examples: usize },
    Bootstrap { num_bags: usize, seed: Option<u64> },
}

impl Default for SplittingConfig {
    fn default() -> Self {
        SplittingConfig::KFold {
            num_folds: 5,
            seed: None,
        }
    }
}

impl FromStr for SplittingConfig {
    type Err = String;

    /// Leave-one-out needs the dataset size and is not available by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kfold" | "k_fold" => Ok(SplittingConfig::default()),
            "stratified" | "stratified_kfold" => Ok(SplittingConfig::StratifiedKFold {
                num_folds: 5,
                seed: None,
            }),
            "bootstrap" => Ok(SplittingConfig::Bootstrap {
                num_bags: 10,
                seed: None,
            }),
            _ => Err(format!(
                "Unknown splitting strategy: {}. Valid options are: kfold, stratified, bootstrap",
                s
            )),
        }
    }
}

/// Bundled evaluation criteria.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriterionConfig {
    #[default]
    MeanSquaredError,
    MeanAbsoluteError,
    Accuracy,
    ErrorRate,
}

impl FromStr for CriterionConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mse" | "mean_squared_error" => Ok(CriterionConfig::MeanSquaredError),
            "mae" | "mean_absolute_error" => Ok(CriterionConfig::MeanAbsoluteError),
            "accuracy" => Ok(CriterionConfig::Accuracy),
            "error_rate" => Ok(CriterionConfig::ErrorRate),
            _ => Err(format!(
                "Unknown criterion: {}. Valid options are: mse, mae, accuracy, error_rate",
                s
            )),
        }
    }
}
