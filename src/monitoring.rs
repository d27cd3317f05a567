//! Hotelling T² monitoring statistics.
//!
//! Per-sample statistics for multivariate control charting: Mahalanobis
//! distance, the squared form (Hotelling T²), the upper control limit for a
//! given significance level, and outlier classification against that limit.

use crate::errors::MspcResult;
use crate::linear_algebra::multiply_matrix_vector;
use crate::quantiles::chi_square_quantile;

/// Mahalanobis distance of a point from the distribution mean, using the
/// inverse covariance as metric tensor.
///
/// Computes `sqrt((x−μ)ᵗ · Σ⁻¹ · (x−μ))`. The quadratic form is clamped at
/// zero before the square root, since floating-point round-off on a point
/// very close to the mean can push it a hair negative.
pub fn mahalanobis_distance(point: &[f64], mean: &[f64], cov_inv: &[Vec<f64>]) -> MspcResult<f64> {
    let diff: Vec<f64> = point.iter().zip(mean).map(|(x, mu)| x - mu).collect();
    let transformed = multiply_matrix_vector(cov_inv, &diff)?;
    let quadratic_form: f64 = diff.iter().zip(&transformed).map(|(d, t)| d * t).sum();
    Ok(quadratic_form.max(0.0).sqrt())
}

/// Hotelling T² statistic: the squared Mahalanobis distance.
pub fn hotelling_t2(point: &[f64], mean: &[f64], cov_inv: &[Vec<f64>]) -> MspcResult<f64> {
    let d = mahalanobis_distance(point, mean, cov_inv)?;
    Ok(d * d)
}

/// Upper control limit for the Hotelling T² chart at significance `alpha`.
///
/// The exact limit is `((n−1)·p/(n−p)) · F_α(p, n−p)`; this uses the
/// large-sample chi-square approximation `χ²_{1−α}(p)` instead, which
/// ignores the sample count. Accurate for large `n` only.
pub fn hotelling_t2_ucl(p: usize, _n: usize, alpha: f64) -> f64 {
    chi_square_quantile(1.0 - alpha, p as f64)
}

/// Classify each T² value against the control limit.
///
/// A sample is out of control iff its statistic strictly exceeds the limit;
/// a value exactly on the limit is in control. Output order mirrors input
/// order.
pub fn classify_outliers(t2_values: &[f64], ucl: f64) -> Vec<bool> {
    t2_values.iter().map(|&t2| t2 > ucl).collect()
}
