use crate::data_handling::Dataset;
use crate::error::SplitError;
use crate::splitting::{complement, Fold, PartitionPlan, SplittingStrategy};

/// Leave-one-out: one fold per example. Deterministic, so repeated runs
/// reproduce the same plan.
pub struct LeaveOneOut {
    num_examples: usize,
}

impl LeaveOneOut {
    /// The fold count of leave-one-out is the dataset size, so it is fixed
    /// here and checked against the data at evaluation time.
    pub fn new(num_examples: usize) -> Self {
        LeaveOneOut { num_examples }
    }
}

impl SplittingStrategy for LeaveOneOut {
    fn num_subsets(&self) -> usize {
        self.num_examples
    }

    fn build_subsets(&mut self, data: &Dataset) -> Result<PartitionPlan, SplitError> {
        let n = data.num_examples();
        self.check(n)?;
        let folds = (0..n)
            .map(|i| Fold::new(complement(n, &[i]), vec![i]))
            .collect();
        Ok(PartitionPlan::new(folds))
    }

    fn check(&self, num_examples: usize) -> Result<(), SplitError> {
        if num_examples != self.num_examples {
            return Err(SplitError::SizeMismatch {
                expected: self.num_examples,
                actual: num_examples,
            });
        }
        if num_examples < 2 {
            return Err(SplitError::TooFewExamples {
                strategy: "leave-one-out",
                needed: 2,
                available: num_examples,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "leave-one-out"
    }
}
