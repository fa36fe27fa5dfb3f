//! Data structures for the examples a machine is evaluated on.
//!
//! This module defines `Features`, `Labels` and the `Dataset` that pairs them,
//! plus `DatasetView`, the index-addressed subset handed to machines for each
//! fold. Views are cheap: they borrow the dataset and only copy rows when a
//! machine asks for materialized features or labels.
use ndarray::{Array1, Array2, ArrayView1, Axis, ShapeError};

use crate::error::EvaluationError;

/// Feature matrix, one example per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    x: Array2<f64>,
}

impl Features {
    pub fn new(x: Array2<f64>) -> Self {
        Features { x }
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, ShapeError> {
        Ok(Features::new(Array2::from_shape_vec(shape, data)?))
    }

    pub fn num_examples(&self) -> usize {
        self.x.nrows()
    }

    pub fn num_dims(&self) -> usize {
        self.x.ncols()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.x.row(index)
    }

    /// Copy the given rows, in order. Repeated indices produce repeated rows.
    pub fn subset(&self, indices: &[usize]) -> Features {
        Features::new(self.x.select(Axis(0), indices))
    }
}

/// Targets aligned with the rows of [`Features`]. Class labels are stored as
/// their numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    y: Array1<f64>,
}

impl Labels {
    pub fn new(y: Array1<f64>) -> Self {
        Labels { y }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Labels::new(Array1::from_vec(values))
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.y.iter()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.y.get(index).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.y.to_vec()
    }

    pub fn subset(&self, indices: &[usize]) -> Labels {
        Labels::new(self.y.select(Axis(0), indices))
    }

    /// Distinct label values in ascending order.
    pub fn classes(&self) -> Vec<f64> {
        let mut classes = self.y.to_vec();
        classes.sort_by(|a, b| a.total_cmp(b));
        classes.dedup();
        classes
    }

    /// Indices of all examples carrying `class`.
    pub fn indices_of(&self, class: f64) -> Vec<usize> {
        self.y
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v == class { Some(i) } else { None })
            .collect()
    }
}

impl From<Vec<f64>> for Labels {
    fn from(values: Vec<f64>) -> Self {
        Labels::from_vec(values)
    }
}

/// The full set of examples an evaluation runs on.
///
/// Features are optional: machines working on a precomputed relation between
/// examples (a fixed kernel matrix, for instance) only need the labels and
/// address examples by index.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Option<Features>,
    labels: Labels,
}

impl Dataset {
    pub fn new(features: Features, labels: Labels) -> Self {
        Dataset {
            features: Some(features),
            labels,
        }
    }

    pub fn labels_only(labels: Labels) -> Self {
        Dataset {
            features: None,
            labels,
        }
    }

    pub fn features(&self) -> Option<&Features> {
        self.features.as_ref()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn has_features(&self) -> bool {
        self.features.is_some()
    }

    pub fn num_examples(&self) -> usize {
        self.labels.len()
    }

    /// Check that labels and features describe the same examples.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        if self.labels.is_empty() {
            return Err(EvaluationError::invalid("dataset has no examples"));
        }
        if let Some(features) = &self.features {
            if features.num_examples() != self.labels.len() {
                return Err(EvaluationError::invalid(format!(
                    "labels length {} does not match number of feature vectors {}",
                    self.labels.len(),
                    features.num_examples()
                )));
            }
        }
        Ok(())
    }

    pub fn view<'a>(&'a self, indices: &'a [usize]) -> DatasetView<'a> {
        DatasetView {
            source: self,
            indices,
        }
    }
}

/// An ordered, index-based subset of a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    source: &'a Dataset,
    indices: &'a [usize],
}

impl<'a> DatasetView<'a> {
    /// Positions of this view's examples in the source dataset.
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn source(&self) -> &'a Dataset {
        self.source
    }

    pub fn has_features(&self) -> bool {
        self.source.has_features()
    }

    /// Materialized feature rows, or `None` for a labels-only dataset.
    pub fn features(&self) -> Option<Features> {
        self.source.features().map(|f| f.subset(self.indices))
    }

    pub fn labels(&self) -> Labels {
        self.source.labels().subset(self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Dataset {
        let x = Features::from_shape_vec((4, 2), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
            .unwrap();
        Dataset::new(x, Labels::from_vec(vec![1.0, -1.0, 1.0, -1.0]))
    }

    #[test]
    fn view_materializes_rows_in_index_order() {
        let data = toy();
        let idx = [3, 0, 3];
        let view = data.view(&idx);
        let features = view.features().unwrap();
        assert_eq!(features.num_examples(), 3);
        assert_eq!(features.row(0).to_vec(), vec![6.0, 7.0]);
        assert_eq!(features.row(1).to_vec(), vec![0.0, 1.0]);
        assert_eq!(view.labels().to_vec(), vec![-1.0, 1.0, -1.0]);
    }

    #[test]
    fn labels_only_views_have_no_features() {
        let data = Dataset::labels_only(Labels::from_vec(vec![0.5, 1.5]));
        let idx = [1];
        let view = data.view(&idx);
        assert!(view.features().is_none());
        assert_eq!(view.labels().to_vec(), vec![1.5]);
    }

    #[test]
    fn validate_rejects_length_mismatch() {
        let x = Features::from_shape_vec((3, 1), vec![0.0, 1.0, 2.0]).unwrap();
        let data = Dataset::new(x, Labels::from_vec(vec![1.0, 2.0]));
        assert!(matches!(
            data.validate(),
            Err(EvaluationError::InvalidConfiguration(_))
        ));
        assert!(toy().validate().is_ok());
    }

    #[test]
    fn classes_are_sorted_and_unique() {
        let labels = Labels::from_vec(vec![2.0, 0.0, 2.0, 1.0, 0.0]);
        assert_eq!(labels.classes(), vec![0.0, 1.0, 2.0]);
        assert_eq!(labels.indices_of(2.0), vec![0, 2]);
    }
}
