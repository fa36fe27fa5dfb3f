//! The cross-validation engine and its result type.
mod aggregate;
mod engine;
mod lock;
pub mod observer;
mod result;

pub use aggregate::aggregate_runs;
pub use engine::MachineEvaluation;
pub use observer::{EvaluationObserver, FoldLogger, FoldRecord, NoopObserver, ScoreTrace};
pub use result::EvaluationResult;
