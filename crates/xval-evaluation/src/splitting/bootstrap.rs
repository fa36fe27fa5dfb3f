use rand::rngs::StdRng;
use rand::Rng;

use crate::data_handling::Dataset;
use crate::error::SplitError;
use crate::splitting::{make_rng, Fold, PartitionPlan, SplittingStrategy};

/// Redraws allowed when a bag happens to contain every example.
const MAX_DRAWS: usize = 100;

/// Bootstrap resampling with out-of-bag testing.
///
/// Each fold trains on `n` examples drawn with replacement, so training sets
/// contain duplicates, and tests on the examples that were never drawn. Test
/// sets of different folds overlap; coverage is not guaranteed.
pub struct Bootstrap {
    num_bags: usize,
    rng: StdRng,
}

impl Bootstrap {
    pub fn new(num_bags: usize) -> Self {
        Bootstrap {
            num_bags,
            rng: make_rng(None),
        }
    }

    pub fn with_seed(num_bags: usize, seed: u64) -> Self {
        Bootstrap {
            num_bags,
            rng: make_rng(Some(seed)),
        }
    }

    fn draw_bag(&mut self, n: usize) -> Option<Fold> {
        for _ in 0..MAX_DRAWS {
            let mut drawn = vec![false; n];
            let mut train: Vec<usize> = (0..n).map(|_| self.rng.gen_range(0..n)).collect();
            for &idx in &train {
                drawn[idx] = true;
            }
            let test: Vec<usize> = (0..n).filter(|&i| !drawn[i]).collect();
            if !test.is_empty() {
                train.sort_unstable();
                return Some(Fold::new(train, test));
            }
        }
        None
    }
}

impl SplittingStrategy for Bootstrap {
    fn num_subsets(&self) -> usize {
        self.num_bags
    }

    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError> {
        let n = data.num_examples();
        self.check(n)?;

        let mut folds = Vec::with_capacity(self.num_bags);
        for bag in 0..self.num_bags {
            let fold = self.draw_bag(n).ok_or_else(|| {
                SplitError::InvalidParameter(format!(
                    "no out-of-bag examples after {} draws over {} examples",
                    MAX_DRAWS, n
                ))
            })?;
            log::trace!(
                "bootstrap: bag {} with {} drawn and {} out-of-bag examples",
                bag,
                fold.train.len(),
                fold.test.len()
            );
            folds.push(fold);
        }
        Ok(PartitionPlan::new(folds))
    }

    fn check(&self, num_examples: usize) -> Result<(), SplitError> {
        if self.num_bags == 0 {
            return Err(SplitError::InvalidParameter(
                "bootstrap needs at least one bag".to_string(),
            ));
        }
        if num_examples < 2 {
            return Err(SplitError::TooFewExamples {
                strategy: "bootstrap",
                needed: 2,
                available: num_examples,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "bootstrap"
    }
}
