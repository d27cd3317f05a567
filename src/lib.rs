//! # Multivariate SPC Engine
//!
//! A dimension-agnostic statistics engine for exploring elliptical
//! (multivariate normal) distributions under Hotelling T² monitoring, the
//! core of multivariate statistical process control (MSPC).
//!
//! The engine is purely functional: every public operation is a
//! deterministic computation over its explicit inputs (given its random
//! source), with no shared mutable state. Callers pass a configuration,
//! receive a complete result set, and own everything they get back.
//!
//! ## Key Features
//!
//! - **Linear algebra kernel**: Cholesky factorization and Gauss-Jordan
//!   inversion with epsilon-clamped, never-failing handling of degenerate
//!   covariance matrices
//! - **Multivariate sampling**: Box-Muller normal variates transformed
//!   through the Cholesky factor, with seedable ChaCha20 randomness for
//!   reproducible runs
//! - **T² monitoring**: Mahalanobis distance, per-sample Hotelling T², and
//!   a chi-square-approximated upper control limit
//! - **Density estimation**: Gaussian-kernel KDE with Silverman bandwidth
//!   and density-normalized histograms for marginal and distance
//!   distributions
//!
//! ## Quick Start
//!
//! ```rust
//! use mspc_engine::{analyze, EllipticalConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EllipticalConfig {
//!         dimension: 2,
//!         means: vec![0.0, 0.0],
//!         variances: vec![1.0, 1.0],
//!         correlations: vec![0.5],
//!         sample_count: 500,
//!         alpha: 0.05,
//!         seed: Some(42),
//!         ..EllipticalConfig::default()
//!     };
//!
//!     let analysis = analyze(&config)?;
//!
//!     let flagged = analysis.outliers.iter().filter(|&&o| o).count();
//!     println!(
//!         "{} of {} samples beyond UCL = {:.2}",
//!         flagged,
//!         analysis.samples.len(),
//!         analysis.ucl
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Numerical Policy
//!
//! Degenerate input (non-positive-definite covariance, near-singular
//! matrices) never fails: Cholesky and inversion clamp with ε = 1e-10 and
//! return a best-effort result. The `*_with_diagnostics` variants in
//! [`linear_algebra`] report when clamping occurred. Only structurally
//! invalid calls (mismatched lengths, out-of-range parameters) surface as
//! errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod covariance;
pub mod density;
pub mod errors;
pub mod export;
pub mod linear_algebra;
pub mod monitoring;
pub mod quantiles;
pub mod sampling;
pub mod secure_rng;

pub use analyzer::{
    analyze, DensityComparison, EllipticalAnalysis, EllipticalConfig, MarginalDistribution,
    DISTANCE_BIN_COUNT, KDE_GRID_SIZE, MARGINAL_BIN_COUNT,
};
pub use covariance::{build_covariance_matrix, pair_index};
pub use density::{
    histogram, kernel_density_estimation, silverman_bandwidth, DensityPoint, HistogramBin,
    HistogramRange,
};
pub use errors::{MspcError, MspcResult};
pub use export::export_delimited;
pub use linear_algebra::{
    cholesky, cholesky_with_diagnostics, invert_matrix, invert_matrix_with_diagnostics,
    multiply_matrix_vector, CLAMP_EPSILON,
};
pub use monitoring::{classify_outliers, hotelling_t2, hotelling_t2_ucl, mahalanobis_distance};
pub use quantiles::{chi_square_quantile, normal_quantile};
pub use sampling::{generate_standard_normal_with_rng, sample_multivariate_normal};
pub use secure_rng::SecureRng;
