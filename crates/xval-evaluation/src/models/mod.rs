pub mod factory;
pub mod kernel_ridge;
pub mod machine_trait;
pub mod nearest_centroid;

pub use kernel_ridge::KernelRidge;
pub use machine_trait::Machine;
pub use nearest_centroid::NearestCentroid;
