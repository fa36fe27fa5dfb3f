use anyhow::bail;
use ndarray::{Array2, ArrayView1, Axis};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn gaussian(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, width: f64) -> f64 {
    let sq_dist: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
    (-sq_dist / width).exp()
}

/// Gaussian kernel `exp(-||a_i - b_j||^2 / width)` between the rows of `lhs`
/// and the rows of `rhs`.
pub fn gaussian_kernel(
    lhs: &Array2<f64>,
    rhs: &Array2<f64>,
    width: f64,
) -> anyhow::Result<Array2<f64>> {
    if !(width > 0.0) {
        bail!("kernel width must be positive, got {}", width);
    }
    if lhs.ncols() != rhs.ncols() {
        bail!(
            "cannot compare {}-dimensional with {}-dimensional feature vectors",
            lhs.ncols(),
            rhs.ncols()
        );
    }

    let (n, m) = (lhs.nrows(), rhs.nrows());
    let row = |i: usize| -> Vec<f64> {
        (0..m)
            .map(|j| gaussian(lhs.row(i), rhs.row(j), width))
            .collect()
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f64>> = (0..n).into_par_iter().map(row).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f64>> = (0..n).map(row).collect();

    Ok(Array2::from_shape_vec((n, m), rows.concat())?)
}

/// `matrix[rows, cols]`, preserving the order (and repetitions) of both
/// index lists.
pub fn submatrix(matrix: &Array2<f64>, rows: &[usize], cols: &[usize]) -> Array2<f64> {
    matrix.select(Axis(0), rows).select(Axis(1), cols)
}
