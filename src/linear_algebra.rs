//! Dense linear algebra primitives for covariance computations.
//!
//! This module provides the factorization and inversion routines needed by
//! the sampling and monitoring layers: Cholesky decomposition, Gauss-Jordan
//! inversion with partial pivoting, and matrix-vector products.
//!
//! Numerical degeneracy (non-positive-definite input, near-zero pivots) is
//! handled by epsilon clamping rather than failure. The result is inexact
//! for degenerate input, but every operation completes. Callers that need
//! to detect degradation can use the `*_with_diagnostics` variants, which
//! report whether any clamping occurred.

use crate::errors::{MspcError, MspcResult};

/// Floor applied to pivots and Cholesky divisors to avoid division by zero
/// on degenerate matrices.
pub const CLAMP_EPSILON: f64 = 1e-10;

/// Validates that a matrix is square, non-empty, and not ragged.
///
/// Returns the matrix order on success.
fn ensure_square_matrix(a: &[Vec<f64>], operation: &str) -> MspcResult<usize> {
    let n = a.len();
    if n == 0 {
        return Err(MspcError::NumericalError {
            reason: "Empty matrix provided".to_string(),
            operation: Some(operation.to_string()),
        });
    }

    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(MspcError::DimensionMismatch {
                object: format!("matrix row {}", i),
                expected: n,
                actual: row.len(),
            });
        }
    }

    Ok(n)
}

/// Cholesky decomposition of a symmetric positive-semi-definite matrix.
///
/// Returns the lower-triangular factor `L` such that `L·Lᵗ ≈ A`.
///
/// Non-positive-definite input does not fail: negative arguments under the
/// square root are clamped to zero and near-zero diagonal divisors are
/// floored to [`CLAMP_EPSILON`], so the factorization is merely inexact.
///
/// # Example
/// ```rust
/// use mspc_engine::linear_algebra::cholesky;
///
/// let a = vec![vec![1.0, 0.5], vec![0.5, 1.0]];
/// let l = cholesky(&a).unwrap();
/// assert!((l[0][0] - 1.0).abs() < 1e-12);
/// assert!((l[1][0] - 0.5).abs() < 1e-12);
/// ```
pub fn cholesky(matrix: &[Vec<f64>]) -> MspcResult<Vec<Vec<f64>>> {
    cholesky_with_diagnostics(matrix).map(|(l, _)| l)
}

/// Cholesky decomposition that also reports whether the input was rank
/// deficient.
///
/// The boolean is `true` when the input was not positive definite to working
/// precision: a diagonal argument below [`CLAMP_EPSILON`] (exactly singular
/// or indefinite input) or a floored divisor both raise it, consistent with
/// [`invert_matrix_with_diagnostics`].
pub fn cholesky_with_diagnostics(matrix: &[Vec<f64>]) -> MspcResult<(Vec<Vec<f64>>, bool)> {
    let n = ensure_square_matrix(matrix, "cholesky")?;
    let mut l = vec![vec![0.0; n]; n];
    let mut clamped = false;

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[i][k] * l[j][k];
            }

            if i == j {
                let arg = matrix[i][i] - sum;
                if arg < CLAMP_EPSILON {
                    clamped = true;
                }
                l[i][j] = arg.max(0.0).sqrt();
            } else {
                let divisor = l[j][j];
                if divisor < CLAMP_EPSILON {
                    clamped = true;
                }
                l[i][j] = (matrix[i][j] - sum) / divisor.max(CLAMP_EPSILON);
            }
        }
    }

    if clamped {
        log::debug!("cholesky: input not positive definite, factor stabilized by clamping");
    }

    Ok((l, clamped))
}

/// Matrix inversion via Gauss-Jordan elimination with partial pivoting.
///
/// Works on the augmented pair `[A | I]`, selecting the row with the largest
/// absolute value in the current column as pivot. Pivot magnitudes are
/// floored to [`CLAMP_EPSILON`] before division, trading exactness for
/// stability on singular input: a singular matrix yields a finite but
/// meaningless "inverse" rather than an error.
pub fn invert_matrix(matrix: &[Vec<f64>]) -> MspcResult<Vec<Vec<f64>>> {
    invert_matrix_with_diagnostics(matrix).map(|(inv, _)| inv)
}

/// Gauss-Jordan inversion that also reports whether a degenerate pivot was
/// floored to [`CLAMP_EPSILON`].
pub fn invert_matrix_with_diagnostics(matrix: &[Vec<f64>]) -> MspcResult<(Vec<Vec<f64>>, bool)> {
    let n = ensure_square_matrix(matrix, "invert_matrix")?;
    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut inv = vec![vec![0.0; n]; n];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    let mut clamped = false;

    for i in 0..n {
        // Partial pivoting: bring the largest remaining entry in this
        // column into the pivot position.
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[k][i].abs() > a[max_row][i].abs() {
                max_row = k;
            }
        }
        a.swap(i, max_row);
        inv.swap(i, max_row);

        let mut pivot = a[i][i];
        if pivot.abs() < CLAMP_EPSILON {
            pivot = if pivot < 0.0 {
                -CLAMP_EPSILON
            } else {
                CLAMP_EPSILON
            };
            clamped = true;
        }

        for j in 0..n {
            a[i][j] /= pivot;
            inv[i][j] /= pivot;
        }

        for k in 0..n {
            if k != i {
                let factor = a[k][i];
                for j in 0..n {
                    a[k][j] -= factor * a[i][j];
                    inv[k][j] -= factor * inv[i][j];
                }
            }
        }
    }

    if clamped {
        log::debug!("invert_matrix: near-singular pivot floored to {CLAMP_EPSILON}");
    }

    Ok((inv, clamped))
}

/// Dense matrix-vector product, O(n²).
pub fn multiply_matrix_vector(matrix: &[Vec<f64>], vector: &[f64]) -> MspcResult<Vec<f64>> {
    let mut result = Vec::with_capacity(matrix.len());
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != vector.len() {
            return Err(MspcError::DimensionMismatch {
                object: format!("matrix row {}", i),
                expected: vector.len(),
                actual: row.len(),
            });
        }
        result.push(row.iter().zip(vector).map(|(m, v)| m * v).sum());
    }
    Ok(result)
}
