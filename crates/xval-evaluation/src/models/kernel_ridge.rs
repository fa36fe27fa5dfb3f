use anyhow::{anyhow, bail};
use ndarray::Array2;

use crate::data_handling::{DatasetView, Features, Labels};
use crate::math::{gaussian_kernel, solve_regularized, submatrix};
use crate::models::machine_trait::Machine;

enum KernelSource {
    Gaussian { width: f64 },
    /// Fixed relation between the examples of one dataset, addressed by index.
    Precomputed(Array2<f64>),
}

/// Full-dataset state kept between `lock` and `unlock`.
struct LockedData {
    kernel: Array2<f64>,
    features: Features,
    labels: Labels,
}

struct Fitted {
    alpha: ndarray::Array1<f64>,
    train_indices: Vec<usize>,
    train_features: Option<Features>,
}

/// Kernel ridge regression.
///
/// Predictions are `f(x) = sum_i alpha_i k(x_i, x)` with
/// `(K + lambda I) alpha = y`. With a Gaussian kernel the machine can be
/// locked: the kernel over the whole dataset is computed once and every fold
/// slices it instead of recomputing pairwise distances.
pub struct KernelRidge {
    lambda: f64,
    kernel: KernelSource,
    locked: Option<LockedData>,
    fitted: Option<Fitted>,
}

impl KernelRidge {
    pub fn new(lambda: f64, width: f64) -> Self {
        KernelRidge {
            lambda,
            kernel: KernelSource::Gaussian { width },
            locked: None,
            fitted: None,
        }
    }

    /// Machine over a fixed `n x n` kernel. Training and prediction only use
    /// the view indices, so it works with labels-only datasets.
    pub fn precomputed(lambda: f64, kernel: Array2<f64>) -> anyhow::Result<Self> {
        if kernel.nrows() != kernel.ncols() {
            bail!(
                "precomputed kernel must be square, got {}x{}",
                kernel.nrows(),
                kernel.ncols()
            );
        }
        Ok(KernelRidge {
            lambda,
            kernel: KernelSource::Precomputed(kernel),
            locked: None,
            fitted: None,
        })
    }

    fn fitted(&self) -> anyhow::Result<&Fitted> {
        self.fitted
            .as_ref()
            .ok_or_else(|| anyhow!("kernel ridge has not been trained"))
    }

    fn fit(
        &mut self,
        k: Array2<f64>,
        labels: &Labels,
        train_indices: &[usize],
        train_features: Option<Features>,
    ) -> anyhow::Result<()> {
        if train_indices.is_empty() {
            bail!("cannot train kernel ridge on an empty subset");
        }
        let alpha = solve_regularized(k, labels.values(), self.lambda)?;
        self.fitted = Some(Fitted {
            alpha,
            train_indices: train_indices.to_vec(),
            train_features,
        });
        Ok(())
    }
}

fn check_indices(num_examples: usize, indices: &[usize]) -> anyhow::Result<()> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= num_examples) {
        bail!(
            "index {} is outside the kernel of {} examples",
            bad,
            num_examples
        );
    }
    Ok(())
}

impl Machine for KernelRidge {
    fn train(&mut self, data: &DatasetView<'_>) -> anyhow::Result<()> {
        let (k, train_features) = match &self.kernel {
            KernelSource::Gaussian { width } => {
                let features = data
                    .features()
                    .ok_or_else(|| anyhow!("a gaussian kernel needs feature vectors"))?;
                let k = gaussian_kernel(features.as_array(), features.as_array(), *width)?;
                (k, Some(features))
            }
            KernelSource::Precomputed(kernel) => {
                check_indices(kernel.nrows(), data.indices())?;
                (submatrix(kernel, data.indices(), data.indices()), None)
            }
        };
        self.fit(k, &data.labels(), data.indices(), train_features)
    }

    fn predict(&self, data: &DatasetView<'_>) -> anyhow::Result<Labels> {
        let fitted = self.fitted()?;
        let k = match &self.kernel {
            KernelSource::Gaussian { width } => {
                let features = data
                    .features()
                    .ok_or_else(|| anyhow!("a gaussian kernel needs feature vectors"))?;
                let train = fitted
                    .train_features
                    .as_ref()
                    .ok_or_else(|| anyhow!("training features are missing"))?;
                gaussian_kernel(features.as_array(), train.as_array(), *width)?
            }
            KernelSource::Precomputed(kernel) => {
                check_indices(kernel.nrows(), data.indices())?;
                submatrix(kernel, data.indices(), &fitted.train_indices)
            }
        };
        Ok(Labels::new(k.dot(&fitted.alpha)))
    }

    fn supports_locking(&self) -> bool {
        matches!(self.kernel, KernelSource::Gaussian { .. })
    }

    fn lock(&mut self, features: &Features, labels: &Labels) -> anyhow::Result<()> {
        let width = match &self.kernel {
            KernelSource::Gaussian { width } => *width,
            KernelSource::Precomputed(_) => bail!("a precomputed kernel cannot be locked"),
        };
        if features.num_examples() != labels.len() {
            bail!(
                "cannot lock on {} feature vectors with {} labels",
                features.num_examples(),
                labels.len()
            );
        }
        log::debug!(
            "Locking kernel ridge: precomputing {}x{} kernel matrix",
            features.num_examples(),
            features.num_examples()
        );
        let kernel = gaussian_kernel(features.as_array(), features.as_array(), width)?;
        self.locked = Some(LockedData {
            kernel,
            features: features.clone(),
            labels: labels.clone(),
        });
        Ok(())
    }

    fn unlock(&mut self) {
        self.locked = None;
    }

    fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    fn train_locked(&mut self, indices: &[usize]) -> anyhow::Result<()> {
        let locked = self
            .locked
            .as_ref()
            .ok_or_else(|| anyhow!("kernel ridge is not locked"))?;
        check_indices(locked.kernel.nrows(), indices)?;
        let k = submatrix(&locked.kernel, indices, indices);
        let labels = locked.labels.subset(indices);
        let features = locked.features.subset(indices);
        self.fit(k, &labels, indices, Some(features))
    }

    fn predict_locked(&self, indices: &[usize]) -> anyhow::Result<Labels> {
        let locked = self
            .locked
            .as_ref()
            .ok_or_else(|| anyhow!("kernel ridge is not locked"))?;
        let fitted = self.fitted()?;
        check_indices(locked.kernel.nrows(), indices)?;
        let k = submatrix(&locked.kernel, indices, &fitted.train_indices);
        Ok(Labels::new(k.dot(&fitted.alpha)))
    }

    fn name(&self) -> &str {
        "kernel ridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::Dataset;

    fn line() -> Dataset {
        let x: Vec<f64> = (0..12).map(|i| i as f64 / 4.0).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        Dataset::new(
            Features::from_shape_vec((12, 1), x).unwrap(),
            Labels::from_vec(y),
        )
    }

    #[test]
    fn locked_and_unlocked_training_agree() {
        let data = line();
        let train_idx: Vec<usize> = (0..12).filter(|i| i % 3 != 0).collect();
        let test_idx: Vec<usize> = (0..12).filter(|i| i % 3 == 0).collect();

        let mut plain = KernelRidge::new(1e-3, 1.0);
        plain.train(&data.view(&train_idx)).unwrap();
        let expected = plain.predict(&data.view(&test_idx)).unwrap();

        let mut locked = KernelRidge::new(1e-3, 1.0);
        locked
            .lock(data.features().unwrap(), data.labels())
            .unwrap();
        assert!(locked.is_locked());
        locked.train_locked(&train_idx).unwrap();
        let got = locked.predict_locked(&test_idx).unwrap();

        for (a, b) in expected.iter().zip(got.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
        locked.unlock();
        assert!(!locked.is_locked());
        // still usable through the unlocked path after unlock
        let again = locked.predict(&data.view(&test_idx)).unwrap();
        assert_eq!(again.len(), test_idx.len());
    }

    #[test]
    fn interpolates_smooth_function() {
        let data = line();
        let train_idx: Vec<usize> = (0..12).collect();
        let mut model = KernelRidge::new(1e-4, 1.0);
        model.train(&data.view(&train_idx)).unwrap();
        let pred = model.predict(&data.view(&[5])).unwrap();
        assert!((pred.values()[0] - data.labels().values()[5]).abs() < 5e-2);
    }

    #[test]
    fn precomputed_kernel_trains_on_labels_only() {
        let kernel = Array2::from_shape_fn((4, 4), |(i, j)| if i == j { 1.0 } else { 0.5 });
        let data = Dataset::labels_only(Labels::from_vec(vec![1.0, 2.0, 3.0, 4.0]));
        let mut model = KernelRidge::precomputed(0.1, kernel).unwrap();
        assert!(!model.supports_locking());
        model.train(&data.view(&[0, 1, 2])).unwrap();
        let pred = model.predict(&data.view(&[3])).unwrap();
        assert_eq!(pred.len(), 1);
        assert!(model.train(&data.view(&[0, 9])).is_err());
    }

    #[test]
    fn predict_before_train_fails() {
        let data = line();
        let model = KernelRidge::new(0.1, 1.0);
        assert!(model.predict(&data.view(&[0])).is_err());
        assert!(model.predict_locked(&[0]).is_err());
    }
}
