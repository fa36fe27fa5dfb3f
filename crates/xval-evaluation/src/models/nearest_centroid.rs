use anyhow::{anyhow, bail};
use ndarray::{Array1, Axis};

use crate::data_handling::{DatasetView, Labels};
use crate::models::machine_trait::Machine;

/// Assigns each example the class whose training mean is closest in
/// Euclidean distance. Ties go to the smaller class value.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    centroids: Vec<(f64, Array1<f64>)>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        NearestCentroid::default()
    }

    /// `(class, centroid)` pairs from the last training call.
    pub fn centroids(&self) -> &[(f64, Array1<f64>)] {
        &self.centroids
    }
}

impl Machine for NearestCentroid {
    fn train(&mut self, data: &DatasetView<'_>) -> anyhow::Result<()> {
        let features = data
            .features()
            .ok_or_else(|| anyhow!("nearest centroid needs feature vectors"))?;
        if data.is_empty() {
            bail!("cannot train nearest centroid on an empty subset");
        }
        let labels = data.labels();

        let mut centroids = Vec::new();
        for class in labels.classes() {
            let members = labels.indices_of(class);
            let centroid = features
                .subset(&members)
                .as_array()
                .mean_axis(Axis(0))
                .ok_or_else(|| anyhow!("class {} has no examples", class))?;
            centroids.push((class, centroid));
        }
        log::trace!("Nearest centroid trained {} classes", centroids.len());
        self.centroids = centroids;
        Ok(())
    }

    fn predict(&self, data: &DatasetView<'_>) -> anyhow::Result<Labels> {
        if self.centroids.is_empty() {
            bail!("nearest centroid has not been trained");
        }
        let features = data
            .features()
            .ok_or_else(|| anyhow!("nearest centroid needs feature vectors"))?;

        let predictions = features
            .as_array()
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = (f64::INFINITY, self.centroids[0].0);
                for (class, centroid) in &self.centroids {
                    let dist: f64 = row
                        .iter()
                        .zip(centroid.iter())
                        .map(|(a, b)| (a - b).powi(2))
                        .sum();
                    if dist < best.0 {
                        best = (dist, *class);
                    }
                }
                best.1
            })
            .collect::<Vec<f64>>();

        Ok(Labels::from_vec(predictions))
    }

    fn name(&self) -> &str {
        "nearest centroid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::{Dataset, Features};

    #[test]
    fn separates_two_clusters() {
        let x = Features::from_shape_vec(
            (6, 2),
            vec![
                0.0, 0.0, // class -1
                0.2, 0.1, // class -1
                0.1, 0.3, // class -1
                5.0, 5.0, // class 1
                5.2, 4.9, // class 1
                4.8, 5.1, // class 1
            ],
        )
        .unwrap();
        let data = Dataset::new(x, Labels::from_vec(vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0]));

        let mut model = NearestCentroid::new();
        model.train(&data.view(&[0, 1, 3, 4])).unwrap();
        assert_eq!(model.centroids().len(), 2);
        assert!(!model.supports_locking());

        let pred = model.predict(&data.view(&[2, 5])).unwrap();
        assert_eq!(pred.to_vec(), vec![-1.0, 1.0]);
    }

    #[test]
    fn refuses_labels_only_data() {
        let data = Dataset::labels_only(Labels::from_vec(vec![0.0, 1.0]));
        let mut model = NearestCentroid::new();
        assert!(model.train(&data.view(&[0, 1])).is_err());
        let mut locked = NearestCentroid::new();
        assert!(locked.train_locked(&[0]).is_err());
    }
}
