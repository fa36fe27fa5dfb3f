use anyhow::bail;

use crate::data_handling::{DatasetView, Features, Labels};

/// Contract between the evaluation engine and a trainable model.
///
/// A machine may additionally support *locking*: `lock` hands it the complete
/// dataset once so it can precompute structure shared by all folds (a full
/// kernel matrix, say). While locked the engine only trains and predicts by
/// index into that dataset via `train_locked` / `predict_locked`.
pub trait Machine {
    /// Train on the examples of `data`, replacing any previous model.
    fn train(&mut self, data: &DatasetView<'_>) -> anyhow::Result<()>;

    /// Predict one label per example of `data`.
    fn predict(&self, data: &DatasetView<'_>) -> anyhow::Result<Labels>;

    fn supports_locking(&self) -> bool {
        false
    }

    /// Precompute shared structure for the complete dataset.
    fn lock(&mut self, _features: &Features, _labels: &Labels) -> anyhow::Result<()> {
        bail!("{} does not support locking", self.name())
    }

    /// Drop the structure kept by `lock`. A no-op when not locked.
    fn unlock(&mut self) {}

    fn is_locked(&self) -> bool {
        false
    }

    /// Train on the locked examples at `indices`.
    fn train_locked(&mut self, _indices: &[usize]) -> anyhow::Result<()> {
        bail!("{} does not support locked training", self.name())
    }

    /// Predict the locked examples at `indices`.
    fn predict_locked(&self, _indices: &[usize]) -> anyhow::Result<Labels> {
        bail!("{} does not support locked prediction", self.name())
    }

    /// Optional human readable name for the machine
    fn name(&self) -> &str {
        "machine"
    }
}

impl<M: Machine + ?Sized> Machine for Box<M> {
    fn train(&mut self, data: &DatasetView<'_>) -> anyhow::Result<()> {
        (**self).train(data)
    }

    fn predict(&self, data: &DatasetView<'_>) -> anyhow::Result<Labels> {
        (**self).predict(data)
    }

    fn supports_locking(&self) -> bool {
        (**self).supports_locking()
    }

    fn lock(&mut self, features: &Features, labels: &Labels) -> anyhow::Result<()> {
        (**self).lock(features, labels)
    }

    fn unlock(&mut self) {
        (**self).unlock()
    }

    fn is_locked(&self) -> bool {
        (**self).is_locked()
    }

    fn train_locked(&mut self, indices: &[usize]) -> anyhow::Result<()> {
        (**self).train_locked(indices)
    }

    fn predict_locked(&self, indices: &[usize]) -> anyhow::Result<Labels> {
        (**self).predict_locked(indices)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
