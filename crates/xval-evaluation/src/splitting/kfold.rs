use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data_handling::Dataset;
use crate::error::SplitError;
use crate::splitting::{complement, make_rng, Fold, PartitionPlan, SplittingStrategy};

/// Plain k-fold cross-validation.
///
/// Examples are (optionally) shuffled and cut into `k` contiguous test blocks;
/// the first `n % k` blocks hold one extra example. Every example is tested
/// exactly once per plan.
pub struct KFold {
    num_folds: usize,
    shuffle: bool,
    rng: StdRng,
}

impl KFold {
    /// Shuffled k-fold seeded from entropy.
    pub fn new(num_folds: usize) -> Self {
        KFold {
            num_folds,
            shuffle: true,
            rng: make_rng(None),
        }
    }

    /// Shuffled k-fold with a reproducible sequence of plans.
    pub fn with_seed(num_folds: usize, seed: u64) -> Self {
        KFold {
            num_folds,
            shuffle: true,
            rng: make_rng(Some(seed)),
        }
    }

    /// Unshuffled k-fold: test blocks follow example order, every plan is the
    /// same.
    pub fn sequential(num_folds: usize) -> Self {
        KFold {
            num_folds,
            shuffle: false,
            rng: make_rng(Some(0)),
        }
    }
}

impl SplittingStrategy for KFold {
    fn num_subsets(&self) -> usize {
        self.num_folds
    }

    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError> {
        let n = data.num_examples();
        self.check(n)?;

        let mut order: Vec<usize> = (0..n).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }

        let base = n / self.num_folds;
        let extra = n % self.num_folds;
        let mut start = 0;
        let mut folds = Vec::with_capacity(self.num_folds);
        for fold in 0..self.num_folds {
            let size = base + usize::from(fold < extra);
            let mut test = order[start..start + size].to_vec();
            test.sort_unstable();
            start += size;

            let train = complement(n, &test);
            log::trace!(
                "k-fold: fold {} with {} training and {} test examples",
                fold,
                train.len(),
                test.len()
            );
            folds.push(Fold::new(train, test));
        }

        Ok(PartitionPlan::new(folds))
    }

    fn check(&self, num_examples: usize) -> Result<(), SplitError> {
        if self.num_folds < 2 {
            return Err(SplitError::InvalidParameter(format!(
                "k-fold needs at least 2 folds, got {}",
                self.num_folds
            )));
        }
        if num_examples < self.num_folds {
            return Err(SplitError::TooFewExamples {
                strategy: "k-fold",
                needed: self.num_folds,
                available: num_examples,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "k-fold"
    }
}
