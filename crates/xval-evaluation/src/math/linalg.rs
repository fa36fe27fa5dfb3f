use anyhow::bail;
use ndarray::{Array1, Array2};

/// Solve `(k + lambda * I) x = y` by Cholesky decomposition.
///
/// `k` must be symmetric; the regularized matrix must be positive definite.
pub fn solve_regularized(
    mut k: Array2<f64>,
    y: &Array1<f64>,
    lambda: f64,
) -> anyhow::Result<Array1<f64>> {
    let n = k.nrows();
    if k.ncols() != n || y.len() != n {
        bail!(
            "system shape mismatch: matrix {}x{}, right-hand side {}",
            n,
            k.ncols(),
            y.len()
        );
    }
    for i in 0..n {
        k[(i, i)] += lambda;
    }

    // k = L L^T, lower triangle only
    let mut l = Array2::<f64>::zeros((n, n));
    for j in 0..n {
        let mut d = k[(j, j)];
        for p in 0..j {
            d -= l[(j, p)] * l[(j, p)];
        }
        if !(d > 0.0) || !d.is_finite() {
            bail!("matrix is not positive definite (pivot {} is {})", j, d);
        }
        let pivot = d.sqrt();
        l[(j, j)] = pivot;
        for i in j + 1..n {
            let mut s = k[(i, j)];
            for p in 0..j {
                s -= l[(i, p)] * l[(j, p)];
            }
            l[(i, j)] = s / pivot;
        }
    }

    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut s = y[i];
        for p in 0..i {
            s -= l[(i, p)] * z[p];
        }
        z[i] = s / l[(i, i)];
    }

    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut s = z[i];
        for p in i + 1..n {
            s -= l[(p, i)] * x[p];
        }
        x[i] = s / l[(i, i)];
    }

    Ok(x)
}
