//! Multivariate normal sampling via Cholesky transformation.
//!
//! Independent standard-normal variates are generated with the Box-Muller
//! transform and mapped into correlated draws through the Cholesky factor
//! of the covariance matrix: `x = L·z + μ`.

use crate::errors::{MspcError, MspcResult};
use crate::linear_algebra::{cholesky, multiply_matrix_vector};
use crate::secure_rng::SecureRng;
use std::f64::consts::PI;

/// Generate a standard normal variate using the Box-Muller transform.
///
/// Each transform consumes two uniforms and yields two independent normals;
/// the sine component is kept in `spare_state` and returned by the next
/// call. The first uniform is clamped strictly positive so the logarithm
/// never sees zero.
pub fn generate_standard_normal_with_rng(
    rng: &mut SecureRng,
    spare_state: &mut Option<f64>,
) -> f64 {
    if let Some(spare) = spare_state.take() {
        return spare;
    }

    let u = rng.f64().max(f64::MIN_POSITIVE);
    let v = rng.f64();

    let mag = (-2.0 * u.ln()).sqrt();
    let angle = 2.0 * PI * v;

    *spare_state = Some(mag * angle.sin());
    mag * angle.cos()
}

/// Draw `n` independent samples from the multivariate normal distribution
/// with the given mean vector and covariance matrix.
///
/// The covariance is factorized once per call; each draw is `L·z + μ` for a
/// vector `z` of independent standard normals. Samples are returned in draw
/// order. A non-positive-definite covariance does not fail: the Cholesky
/// factor is stabilized by clamping and the draws follow the nearest
/// representable distribution.
///
/// # Errors
/// Returns [`MspcError::DimensionMismatch`] when the covariance is not a
/// square matrix of the mean's dimension.
pub fn sample_multivariate_normal(
    mean: &[f64],
    covariance: &[Vec<f64>],
    n: usize,
    rng: &mut SecureRng,
) -> MspcResult<Vec<Vec<f64>>> {
    let dim = mean.len();
    if covariance.len() != dim {
        return Err(MspcError::DimensionMismatch {
            object: "covariance matrix".to_string(),
            expected: dim,
            actual: covariance.len(),
        });
    }

    let l = cholesky(covariance)?;

    let mut spare_state = None;
    let mut samples = Vec::with_capacity(n);
    let mut z = vec![0.0; dim];

    for _ in 0..n {
        for entry in z.iter_mut() {
            *entry = generate_standard_normal_with_rng(rng, &mut spare_state);
        }

        let x = multiply_matrix_vector(&l, &z)?;
        let sample: Vec<f64> = x.iter().zip(mean).map(|(xi, mu)| xi + mu).collect();
        samples.push(sample);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covariance::build_covariance_matrix;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = SecureRng::with_seed(42);
        let mut spare = None;
        let n = 20_000;
        let draws: Vec<f64> = (0..n)
            .map(|_| generate_standard_normal_with_rng(&mut rng, &mut spare))
            .collect();

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n as f64;

        assert_approx_eq!(mean, 0.0, 0.05);
        assert_approx_eq!(var, 1.0, 0.05);
    }

    #[test]
    fn test_spare_value_consumed_alternately() {
        let mut rng_a = SecureRng::with_seed(5);
        let mut rng_b = SecureRng::with_seed(5);
        let mut spare = None;

        // Two consecutive draws consume exactly two uniforms.
        let first = generate_standard_normal_with_rng(&mut rng_a, &mut spare);
        let second = generate_standard_normal_with_rng(&mut rng_a, &mut spare);

        let u = rng_b.f64().max(f64::MIN_POSITIVE);
        let v = rng_b.f64();
        let mag = (-2.0 * u.ln()).sqrt();
        assert_approx_eq!(first, mag * (2.0 * PI * v).cos(), 1e-15);
        assert_approx_eq!(second, mag * (2.0 * PI * v).sin(), 1e-15);
    }

    #[test]
    fn test_sampling_is_reproducible_with_seed() {
        let mean = [1.0, -1.0];
        let cov = build_covariance_matrix(&[1.0, 2.0], &[0.3]);

        let mut rng_a = SecureRng::with_seed(99);
        let mut rng_b = SecureRng::with_seed(99);
        let a = sample_multivariate_normal(&mean, &cov, 50, &mut rng_a).unwrap();
        let b = sample_multivariate_normal(&mean, &cov, 50, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_shape_and_order() {
        let mean = [0.0, 0.0, 0.0];
        let cov = build_covariance_matrix(&[1.0, 1.0, 1.0], &[0.0, 0.0, 0.0]);
        let mut rng = SecureRng::with_seed(1);
        let samples = sample_multivariate_normal(&mean, &cov, 17, &mut rng).unwrap();
        assert_eq!(samples.len(), 17);
        assert!(samples.iter().all(|s| s.len() == 3));
    }

    #[test]
    fn test_sample_moments_match_parameters() {
        let mean = [2.0, -3.0];
        let cov = build_covariance_matrix(&[1.0, 4.0], &[0.6]);
        let mut rng = SecureRng::with_seed(2024);
        let n = 20_000;
        let samples = sample_multivariate_normal(&mean, &cov, n, &mut rng).unwrap();

        let mut emp_mean = [0.0; 2];
        for s in &samples {
            emp_mean[0] += s[0];
            emp_mean[1] += s[1];
        }
        emp_mean[0] /= n as f64;
        emp_mean[1] /= n as f64;

        let mut emp_cov = [[0.0; 2]; 2];
        for s in &samples {
            let d = [s[0] - emp_mean[0], s[1] - emp_mean[1]];
            for i in 0..2 {
                for j in 0..2 {
                    emp_cov[i][j] += d[i] * d[j];
                }
            }
        }
        for row in emp_cov.iter_mut() {
            for entry in row.iter_mut() {
                *entry /= n as f64;
            }
        }

        assert_approx_eq!(emp_mean[0], 2.0, 0.05);
        assert_approx_eq!(emp_mean[1], -3.0, 0.1);
        assert_approx_eq!(emp_cov[0][0], 1.0, 0.1);
        assert_approx_eq!(emp_cov[1][1], 4.0, 0.2);
        // cov(0,1) = 0.6 * sqrt(4) = 1.2
        assert_approx_eq!(emp_cov[0][1], 1.2, 0.1);
    }

    #[test]
    fn test_zero_draws_yields_empty_set() {
        let cov = build_covariance_matrix(&[1.0], &[]);
        let mut rng = SecureRng::with_seed(0);
        let samples = sample_multivariate_normal(&[0.0], &cov, 0, &mut rng).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_mismatched_covariance_rejected() {
        let cov = build_covariance_matrix(&[1.0, 1.0], &[0.0]);
        let mut rng = SecureRng::with_seed(0);
        assert!(sample_multivariate_normal(&[0.0], &cov, 10, &mut rng).is_err());
    }
}
