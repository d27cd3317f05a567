//! Covariance matrix construction from variances and pairwise correlations.
//!
//! The caller specifies the diagonal as per-dimension variances and the
//! off-diagonal structure as a flat list of pairwise correlations over the
//! upper triangle. The resulting matrix is symmetric by construction but is
//! not validated for positive semi-definiteness: out-of-range correlations
//! produce an indefinite matrix, which the downstream Cholesky and inversion
//! routines absorb by clamping.

/// Flat index of the unordered pair `(i, j)`, `i < j`, in a row-major
/// enumeration of the strict upper triangle of a `p`-dimensional matrix.
///
/// For p = 3 the pairs are ordered (0,1), (0,2), (1,2).
pub fn pair_index(i: usize, j: usize, p: usize) -> usize {
    i * p + j - (i + 1) * (i + 2) / 2
}

/// Builds a symmetric covariance matrix from per-dimension variances and
/// pairwise correlations.
///
/// Off-diagonal entry `(i, j)` is `ρ_ij · sqrt(var_i · var_j)`, where `ρ_ij`
/// is read from `correlations` at [`pair_index`]. A correlation missing from
/// the slice is treated as zero, so an empty slice yields a diagonal matrix.
///
/// # Example
/// ```rust
/// use mspc_engine::covariance::build_covariance_matrix;
///
/// let cov = build_covariance_matrix(&[2.0, 3.0], &[0.4]);
/// assert!((cov[0][1] - 0.4 * 6.0f64.sqrt()).abs() < 1e-12);
/// assert_eq!(cov[0][0], 2.0);
/// ```
pub fn build_covariance_matrix(variances: &[f64], correlations: &[f64]) -> Vec<Vec<f64>> {
    let p = variances.len();
    let mut cov = vec![vec![0.0; p]; p];

    for i in 0..p {
        cov[i][i] = variances[i];
        for j in (i + 1)..p {
            let corr = correlations
                .get(pair_index(i, j, p))
                .copied()
                .unwrap_or(0.0);
            let entry = corr * (variances[i] * variances[j]).sqrt();
            cov[i][j] = entry;
            cov[j][i] = entry;
        }
    }

    cov
}
