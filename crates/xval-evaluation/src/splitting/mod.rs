//! Resampling schemes that partition a dataset into train/test folds.
//!
//! A strategy hands the engine a `PartitionPlan` per run. Stochastic
//! strategies own a `StdRng`; seeding it makes the sequence of plans
//! reproducible across processes.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data_handling::Dataset;
use crate::error::SplitError;

pub mod bootstrap;
pub mod kfold;
pub mod loo;
pub mod stratified;

pub use bootstrap::Bootstrap;
pub use kfold::KFold;
pub use loo::LeaveOneOut;
pub use stratified::StratifiedKFold;

/// One train/test pair of example indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Fold {
    pub fn new(train: Vec<usize>, test: Vec<usize>) -> Self {
        Fold { train, test }
    }
}

/// Ordered folds produced for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionPlan {
    folds: Vec<Fold>,
}

impl PartitionPlan {
    pub fn new(folds: Vec<Fold>) -> Self {
        PartitionPlan { folds }
    }

    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }

    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fold> {
        self.folds.iter()
    }

    /// Every index of every fold lies in `0..num_examples`.
    pub fn check_bounds(&self, num_examples: usize) -> Result<(), SplitError> {
        for (fold, subset) in self.folds.iter().enumerate() {
            if let Some(&index) = subset
                .train
                .iter()
                .chain(subset.test.iter())
                .find(|&&i| i >= num_examples)
            {
                return Err(SplitError::IndexOutOfRange {
                    fold,
                    index,
                    len: num_examples,
                });
            }
        }
        Ok(())
    }

    /// True when the test sets together hold each of `0..num_examples` once.
    pub fn covers_exactly_once(&self, num_examples: usize) -> bool {
        let mut seen = vec![0usize; num_examples];
        for subset in &self.folds {
            for &i in &subset.test {
                match seen.get_mut(i) {
                    Some(count) => *count += 1,
                    None => return false,
                }
            }
        }
        seen.iter().all(|&c| c == 1)
    }
}

impl<'a> IntoIterator for &'a PartitionPlan {
    type Item = &'a Fold;
    type IntoIter = std::slice::Iter<'a, Fold>;

    fn into_iter(self) -> Self::IntoIter {
        self.folds.iter()
    }
}

/// Produces partition plans for the evaluation engine.
pub trait SplittingStrategy {
    /// Number of folds in each plan this strategy builds.
    fn num_subsets(&self) -> usize;

    /// Build the next plan. Stochastic strategies advance their generator, so
    /// successive calls yield independent plans.
    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError>;

    /// Whether the strategy needs feature vectors rather than labels alone.
    fn requires_features(&self) -> bool {
        false
    }

    /// Cheap up-front validation against the dataset size.
    fn check(&self, _num_examples: usize) -> Result<(), SplitError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "splitting strategy"
    }
}

impl<S: SplittingStrategy + ?Sized> SplittingStrategy for Box<S> {
    fn num_subsets(&self) -> usize {
        (**self).num_subsets()
    }

    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError> {
        (**self).build_subsets(data)
    }

    fn requires_features(&self) -> bool {
        (**self).requires_features()
    }

    fn check(&self, num_examples: usize) -> Result<(), SplitError> {
        (**self).check(num_examples)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Indices of `0..n` that are not in `test`, ascending.
pub(crate) fn complement(n: usize, test: &[usize]) -> Vec<usize> {
    let mut in_test = vec![false; n];
    for &idx in test {
        in_test[idx] = true;
    }
    (0..n).filter(|&i| !in_test[i]).collect()
}
