//! Ridge-stabilized least squares on standardized features.
//!
//! The intercept is left unpenalized by centering the response; constant
//! feature columns are dropped before solving.

use nalgebra::{DMatrix, DVector};

/// A fitted linear model over the original (unstandardized) feature space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RidgeFit {
    /// Mean of the response.
    pub intercept: f64,
    /// Per-feature mean; the fit is `intercept + Σ coef·(x − mean)`.
    pub means: Vec<f64>,
    /// Per-feature coefficient in original units. Zero for dropped features.
    pub coefficients: Vec<f64>,
    /// Residual standard error with `n − p − 1` degrees of freedom.
    pub residual_std_error: f64,
    /// Number of features that survived the constant-column filter.
    pub active_features: usize,
}

impl RidgeFit {
    pub fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(&self.means)
                .zip(x)
                .map(|((coef, mean), value)| coef * (value - mean))
                .sum::<f64>()
    }

    /// Contribution of feature `j` at point `x`, relative to the sample mean.
    pub fn effect(&self, j: usize, x: &[f64]) -> f64 {
        self.coefficients[j] * (x[j] - self.means[j])
    }
}

/// Fit `y ~ rows` with penalty `lambda · n` on standardized coefficients.
///
/// Returns `None` when the system is degenerate: fewer rows than needed for
/// a residual estimate, or a singular normal matrix.
#[allow(clippy::cast_precision_loss, clippy::many_single_char_names)]
pub(crate) fn fit(rows: &[Vec<f64>], y: &[f64], lambda: f64) -> Option<RidgeFit> {
    let n = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if n == 0 || n != y.len() {
        return None;
    }

    let n_f = n as f64;
    let y_mean = y.iter().sum::<f64>() / n_f;

    let mut means = vec![0.0; width];
    let mut scales = vec![0.0; width];
    for j in 0..width {
        let mean = rows.iter().map(|r| r[j]).sum::<f64>() / n_f;
        let var = rows.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n_f;
        means[j] = mean;
        scales[j] = var.sqrt();
    }
    let active: Vec<usize> = (0..width).filter(|&j| scales[j] > 1e-12).collect();
    let p = active.len();
    if n <= p + 1 {
        return None;
    }

    let z = DMatrix::from_fn(n, p, |i, k| {
        let j = active[k];
        (rows[i][j] - means[j]) / scales[j]
    });
    let centered = DVector::from_iterator(n, y.iter().map(|v| v - y_mean));
    let standardized = solve_normal_equations(&z, &centered, lambda * n_f)?;

    let mut coefficients = vec![0.0; width];
    for (k, &j) in active.iter().enumerate() {
        coefficients[j] = standardized[k] / scales[j];
    }

    let mut fit = RidgeFit {
        intercept: y_mean,
        means,
        coefficients,
        residual_std_error: 0.0,
        active_features: p,
    };
    let ssr: f64 = rows
        .iter()
        .zip(y)
        .map(|(row, &actual)| (actual - fit.predict(row)).powi(2))
        .sum();
    fit.residual_std_error = (ssr / (n - p - 1) as f64).sqrt();
    Some(fit)
}

/// Solve `(ZᵀZ + penalty·I) b = Zᵀc` by Cholesky factorization.
///
/// A factor whose smallest pivot vanishes against the largest is treated as
/// singular.
fn solve_normal_equations(
    z: &DMatrix<f64>,
    centered: &DVector<f64>,
    penalty: f64,
) -> Option<DVector<f64>> {
    let p = z.ncols();
    if p == 0 {
        return Some(DVector::zeros(0));
    }
    let gram = z.transpose() * z + DMatrix::<f64>::identity(p, p) * penalty;
    let rhs = z.transpose() * centered;
    let chol = gram.cholesky()?;
    let pivots = chol.l_dirty().diagonal();
    if pivots.min().powi(2) <= 1e-10 * pivots.max().powi(2) {
        return None;
    }
    Some(chol.solve(&rhs))
}
