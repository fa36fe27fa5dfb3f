use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data_handling::Dataset;
use crate::error::SplitError;
use crate::splitting::{complement, make_rng, Fold, PartitionPlan, SplittingStrategy};

/// K-fold splitting that keeps class proportions roughly equal in each fold.
///
/// The examples of every class are shuffled and dealt round-robin over the
/// folds. The dealing position carries over from one class to the next so
/// fold sizes differ by at most one.
pub struct StratifiedKFold {
    num_folds: usize,
    rng: StdRng,
}

impl StratifiedKFold {
    pub fn new(num_folds: usize) -> Self {
        StratifiedKFold {
            num_folds,
            rng: make_rng(None),
        }
    }

    pub fn with_seed(num_folds: usize, seed: u64) -> Self {
        StratifiedKFold {
            num_folds,
            rng: make_rng(Some(seed)),
        }
    }
}

impl SplittingStrategy for StratifiedKFold {
    fn num_subsets(&self) -> usize {
        self.num_folds
    }

    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError> {
        let n = data.num_examples();
        self.check(n)?;

        let labels = data.labels();
        let mut tests: Vec<Vec<usize>> = vec![Vec::new(); self.num_folds];
        let mut slot = 0;

        for class in labels.classes() {
            let mut members = labels.indices_of(class);
            if members.len() < self.num_folds {
                log::warn!(
                    "Class {} has {} examples for {} folds; some folds will miss it",
                    class,
                    members.len(),
                    self.num_folds
                );
            }
            members.shuffle(&mut self.rng);
            for idx in members {
                tests[slot].push(idx);
                slot = (slot + 1) % self.num_folds;
            }
        }

        let folds = tests
            .into_iter()
            .enumerate()
            .map(|(fold, mut test)| {
                test.sort_unstable();
                let train = complement(n, &test);
                log::trace!(
                    "stratified: fold {} with {} training and {} test examples",
                    fold,
                    train.len(),
                    test.len()
                );
                Fold::new(train, test)
            })
            .collect();

        Ok(PartitionPlan::new(folds))
    }

    fn check(&self, num_examples: usize) -> Result<(), SplitError> {
        if self.num_folds < 2 {
            return Err(SplitError::InvalidParameter(format!(
                "stratified k-fold needs at least 2 folds, got {}",
                self.num_folds
            )));
        }
        if num_examples < self.num_folds {
            return Err(SplitError::TooFewExamples {
                strategy: "stratified k-fold",
                needed: self.num_folds,
                available: num_examples,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stratified k-fold"
    }
}
