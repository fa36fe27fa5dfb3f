use crate::config::{CriterionConfig, MachineConfig, SplittingConfig};
use crate::criterion::{Accuracy, Criterion, ErrorRate, MeanAbsoluteError, MeanSquaredError};
use crate::models::{KernelRidge, Machine, NearestCentroid};
use crate::splitting::{Bootstrap, KFold, LeaveOneOut, SplittingStrategy, StratifiedKFold};

/// Build a boxed machine from a `MachineConfig`.
pub fn build_machine(config: &MachineConfig) -> Box<dyn Machine> {
    match config {
        MachineConfig::KernelRidge {
            lambda,
            kernel_width,
        } => Box::new(KernelRidge::new(*lambda, *kernel_width)),
        MachineConfig::NearestCentroid => Box::new(NearestCentroid::new()),
    }
}

/// Build a boxed splitting strategy. Unseeded variants draw from entropy.
pub fn build_splitting(config: &SplittingConfig) -> Box<dyn SplittingStrategy> {
    match *config {
        SplittingConfig::KFold { num_folds, seed } => match seed {
            Some(seed) => Box::new(KFold::with_seed(num_folds, seed)),
            None => Box::new(KFold::new(num_folds)),
        },
        SplittingConfig::StratifiedKFold { num_folds, seed } => match seed {
            Some(seed) => Box::new(StratifiedKFold::with_seed(num_folds, seed)),
            None => Box::new(StratifiedKFold::new(num_folds)),
        },
        SplittingConfig::LeaveOneOut { num_examples } => Box::new(LeaveOneOut::new(num_examples)),
        SplittingConfig::Bootstrap { num_bags, seed } => match seed {
            Some(seed) => Box::new(Bootstrap::with_seed(num_bags, seed)),
            None => Box::new(Bootstrap::new(num_bags)),
        },
    }
}

pub fn build_criterion(config: CriterionConfig) -> Box<dyn Criterion> {
    match config {
        CriterionConfig::MeanSquaredError => Box::new(MeanSquaredError),
        CriterionConfig::MeanAbsoluteError => Box::new(MeanAbsoluteError),
        CriterionConfig::Accuracy => Box::new(Accuracy),
        CriterionConfig::ErrorRate => Box::new(ErrorRate),
    }
}
