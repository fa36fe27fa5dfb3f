//! xval-evaluation: estimate how well a trainable machine generalizes.
//!
//! [`MachineEvaluation`] repeatedly partitions a dataset with a
//! [`SplittingStrategy`], trains a [`Machine`] on each training subset, scores
//! its predictions on the held-out subset with a [`Criterion`] and aggregates
//! the scores of several independent runs into an [`EvaluationResult`] with an
//! optional Student's t confidence interval.
//!
//! Machines that support *locking* precompute structure for the complete
//! dataset once (a full kernel matrix, say) and then train by index for every
//! fold. The engine locks them for the duration of an evaluation when
//! autolocking is enabled and always releases a lock it acquired itself.
//!
//! A few reference collaborators are included: k-fold, stratified k-fold,
//! leave-one-out and bootstrap splitting, regression and classification
//! criteria, a Gaussian kernel ridge regressor and a nearest centroid
//! classifier.
pub mod config;
pub mod criterion;
pub mod data_handling;
pub mod error;
pub mod evaluation;
pub mod math;
pub mod models;
pub mod splitting;
pub mod stats;

pub use criterion::{Criterion, Direction};
pub use data_handling::{Dataset, DatasetView, Features, Labels};
pub use error::{CriterionError, EvaluationError, FoldStage, SplitError};
pub use evaluation::{EvaluationResult, MachineEvaluation};
pub use models::Machine;
pub use splitting::{PartitionPlan, SplittingStrategy};
