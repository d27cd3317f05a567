//! Full elliptical-distribution analysis pipeline.
//!
//! One call takes an explicit configuration and produces everything the
//! caller needs to render or post-process: the covariance pair, the sample
//! set, per-sample monitoring statistics, outlier flags, density curves,
//! and marginal/distance histograms. The engine holds no state between
//! calls; every parameter change is a fresh, full recomputation driven by
//! the caller.

use crate::covariance::build_covariance_matrix;
use crate::density::{
    histogram, kernel_density_estimation, silverman_bandwidth, DensityPoint, HistogramBin,
    HistogramRange,
};
use crate::errors::{validate_parameter, validate_vector_length, MspcError, MspcResult};
use crate::linear_algebra::invert_matrix;
use crate::monitoring::{classify_outliers, hotelling_t2, hotelling_t2_ucl};
use crate::sampling::sample_multivariate_normal;
use crate::secure_rng::SecureRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid resolution for KDE curves (the curve has one more point).
pub const KDE_GRID_SIZE: usize = 100;

/// Bin count for marginal histograms.
pub const MARGINAL_BIN_COUNT: usize = 30;

/// Bin count for the Mahalanobis-distance histogram.
pub const DISTANCE_BIN_COUNT: usize = 40;

/// Configuration for one elliptical-distribution analysis.
///
/// Correlations are indexed over the strict upper triangle in row-major
/// order, one entry per unordered dimension pair; see
/// [`crate::covariance::pair_index`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EllipticalConfig {
    /// Number of jointly modeled dimensions (p ≥ 1)
    pub dimension: usize,
    /// Mean vector, one entry per dimension
    pub means: Vec<f64>,
    /// Per-dimension variances (diagonal of the covariance)
    pub variances: Vec<f64>,
    /// Pairwise correlations, `p(p−1)/2` entries in [−1, 1]
    pub correlations: Vec<f64>,
    /// Number of samples to draw (n ≥ 1)
    pub sample_count: usize,
    /// Significance level for the T² control limit, in (0, 1)
    pub alpha: f64,
    /// Which dimensions get a KDE/Gaussian density comparison
    pub kde_dimensions: Vec<bool>,
    /// Which dimensions get a marginal histogram
    pub marginal_dimensions: Vec<bool>,
    /// Seed for reproducible sampling; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for EllipticalConfig {
    fn default() -> Self {
        Self {
            dimension: 2,
            means: vec![0.0, 0.0],
            variances: vec![1.0, 1.0],
            correlations: vec![0.0],
            sample_count: 500,
            alpha: 0.05,
            kde_dimensions: vec![true, true],
            marginal_dimensions: vec![true, true],
            seed: None,
        }
    }
}

impl EllipticalConfig {
    /// Validates structural and range constraints.
    ///
    /// Numerically degenerate but well-shaped inputs (e.g. correlations
    /// that make the covariance indefinite while staying in [−1, 1]) pass
    /// validation; the pipeline absorbs them by clamping.
    pub fn validate(&self) -> MspcResult<()> {
        if self.dimension < 1 {
            return Err(MspcError::InvalidParameter {
                parameter: "dimension".to_string(),
                value: self.dimension as f64,
                constraint: ">= 1".to_string(),
            });
        }
        if self.sample_count < 1 {
            return Err(MspcError::InsufficientData {
                required: 1,
                actual: self.sample_count,
            });
        }

        let p = self.dimension;
        validate_vector_length(&self.means, p, "mean vector")?;
        validate_vector_length(&self.variances, p, "variance vector")?;
        validate_vector_length(&self.correlations, p * (p - 1) / 2, "correlation set")?;

        for (i, &variance) in self.variances.iter().enumerate() {
            validate_parameter(variance, 0.0, f64::INFINITY, &format!("variance[{}]", i))?;
        }
        for (i, &correlation) in self.correlations.iter().enumerate() {
            validate_parameter(correlation, -1.0, 1.0, &format!("correlation[{}]", i))?;
        }

        // Open interval: alpha of exactly 0 or 1 makes the limit infinite
        // or degenerate.
        validate_parameter(self.alpha, 0.0, 1.0, "alpha")?;
        if self.alpha == 0.0 || self.alpha == 1.0 {
            return Err(MspcError::InvalidParameter {
                parameter: "alpha".to_string(),
                value: self.alpha,
                constraint: "(0, 1) exclusive".to_string(),
            });
        }

        if self.kde_dimensions.len() != p || self.marginal_dimensions.len() != p {
            return Err(MspcError::DimensionMismatch {
                object: "dimension selection".to_string(),
                expected: p,
                actual: self.kde_dimensions.len().min(self.marginal_dimensions.len()),
            });
        }

        Ok(())
    }
}

/// KDE curve for one dimension, paired with the theoretical Gaussian
/// density evaluated on the same grid.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DensityComparison {
    /// Zero-based dimension index
    pub dimension: usize,
    /// Kernel density estimate
    pub kde: Vec<DensityPoint>,
    /// Gaussian density with the configured marginal mean and variance
    pub gaussian: Vec<DensityPoint>,
}

/// Marginal histogram for one dimension.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginalDistribution {
    /// Zero-based dimension index
    pub dimension: usize,
    /// Density-normalized histogram over the sampled values
    pub histogram: Vec<HistogramBin>,
    /// Configured marginal mean
    pub mean: f64,
    /// Configured marginal standard deviation
    pub std_dev: f64,
}

/// Complete output of one analysis run. The caller owns every field; the
/// engine keeps nothing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EllipticalAnalysis {
    /// Covariance matrix built from the configured variances/correlations
    pub covariance: Vec<Vec<f64>>,
    /// Inverse covariance (Gauss-Jordan)
    pub covariance_inverse: Vec<Vec<f64>>,
    /// Sample set, in draw order
    pub samples: Vec<Vec<f64>>,
    /// Hotelling T² per sample, in draw order
    pub t2_values: Vec<f64>,
    /// Upper control limit for the configured significance level
    pub ucl: f64,
    /// Per-sample out-of-control flags (strictly above the limit)
    pub outliers: Vec<bool>,
    /// KDE/Gaussian curves for the selected dimensions
    pub density_comparisons: Vec<DensityComparison>,
    /// Marginal histograms for the selected dimensions
    pub marginals: Vec<MarginalDistribution>,
    /// Histogram of Mahalanobis distances over [0, max]
    pub distance_distribution: Vec<HistogramBin>,
}

/// Runs the full pipeline: covariance construction, sampling, monitoring
/// statistics, and density estimation.
///
/// # Example
/// ```rust
/// use mspc_engine::{analyze, EllipticalConfig};
///
/// let config = EllipticalConfig {
///     correlations: vec![0.5],
///     seed: Some(42),
///     ..EllipticalConfig::default()
/// };
/// let analysis = analyze(&config).unwrap();
/// assert_eq!(analysis.samples.len(), 500);
/// assert!((analysis.ucl - 5.99).abs() < 0.1);
/// ```
pub fn analyze(config: &EllipticalConfig) -> MspcResult<EllipticalAnalysis> {
    config.validate()?;

    let covariance = build_covariance_matrix(&config.variances, &config.correlations);

    let mut rng = match config.seed {
        Some(seed) => SecureRng::with_seed(seed),
        None => SecureRng::new(),
    };
    let samples =
        sample_multivariate_normal(&config.means, &covariance, config.sample_count, &mut rng)?;

    let covariance_inverse = invert_matrix(&covariance)?;

    let mut t2_values = Vec::with_capacity(samples.len());
    for sample in &samples {
        t2_values.push(hotelling_t2(sample, &config.means, &covariance_inverse)?);
    }

    let ucl = hotelling_t2_ucl(config.dimension, config.sample_count, config.alpha);
    let outliers = classify_outliers(&t2_values, ucl);

    let mut density_comparisons = Vec::new();
    for dim in 0..config.dimension {
        if !config.kde_dimensions[dim] {
            continue;
        }

        let data: Vec<f64> = samples.iter().map(|s| s[dim]).collect();
        let mean = config.means[dim];
        let std_dev = covariance[dim][dim].sqrt();
        let bandwidth = silverman_bandwidth(std_dev, data.len());

        let kde = kernel_density_estimation(&data, bandwidth, KDE_GRID_SIZE);
        let gaussian = kde
            .iter()
            .map(|point| DensityPoint {
                x: point.x,
                density: gaussian_density(point.x, mean, std_dev),
            })
            .collect();

        density_comparisons.push(DensityComparison {
            dimension: dim,
            kde,
            gaussian,
        });
    }

    let mut marginals = Vec::new();
    for dim in 0..config.dimension {
        if !config.marginal_dimensions[dim] {
            continue;
        }

        let data: Vec<f64> = samples.iter().map(|s| s[dim]).collect();
        marginals.push(MarginalDistribution {
            dimension: dim,
            histogram: histogram(&data, MARGINAL_BIN_COUNT, HistogramRange::DataSpan),
            mean: config.means[dim],
            std_dev: covariance[dim][dim].sqrt(),
        });
    }

    let distances: Vec<f64> = t2_values.iter().map(|t2| t2.sqrt()).collect();
    let distance_distribution = histogram(&distances, DISTANCE_BIN_COUNT, HistogramRange::FromZero);

    Ok(EllipticalAnalysis {
        covariance,
        covariance_inverse,
        samples,
        t2_values,
        ucl,
        outliers,
        density_comparisons,
        marginals,
        distance_distribution,
    })
}

/// Density of the normal distribution with the given mean and standard
/// deviation.
fn gaussian_density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (1.0 / (std_dev * (2.0 * std::f64::consts::PI).sqrt())) * (-0.5 * z * z).exp()
}
