//! Small numeric helpers for the bundled machines.
//!
//! Provides the Gaussian kernel matrix (computed row-parallel with `rayon`
//! when the `parallel` feature is on), index-based submatrix selection and a
//! Cholesky solver for regularized kernel systems.
pub mod kernel;
pub mod linalg;

pub use kernel::{gaussian_kernel, submatrix};
pub use linalg::solve_regularized;
