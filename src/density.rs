//! Non-parametric density estimation: Gaussian-kernel KDE and histograms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point of a density curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DensityPoint {
    /// Grid position
    pub x: f64,
    /// Estimated density at `x`
    pub density: f64,
}

/// One histogram bin, normalized to a density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistogramBin {
    /// Bin center
    pub center: f64,
    /// Count divided by `n · bin_width`, so that the bins integrate to
    /// approximately one
    pub density: f64,
}

/// Range convention for histogram binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HistogramRange {
    /// Bins span [min(data), max(data)].
    DataSpan,
    /// Bins span [0, max(data)], for strictly non-negative data such as
    /// Mahalanobis distances.
    FromZero,
}

/// Silverman's rule-of-thumb KDE bandwidth: `1.06 · σ · n^(−1/5)`.
pub fn silverman_bandwidth(std_dev: f64, n: usize) -> f64 {
    1.06 * std_dev * (n as f64).powf(-0.2)
}

/// Gaussian-kernel density estimate over an equally spaced grid.
///
/// The grid has `grid_size + 1` points spanning [min(data), max(data)]; at
/// each grid point the density is the average of standard normal kernels
/// centered at the data, scaled by the bandwidth. Empty input returns an
/// empty curve.
///
/// # Example
/// ```rust
/// use mspc_engine::density::{kernel_density_estimation, silverman_bandwidth};
///
/// let data = vec![-1.0, -0.5, 0.0, 0.5, 1.0];
/// let bw = silverman_bandwidth(0.79, data.len());
/// let curve = kernel_density_estimation(&data, bw, 100);
/// assert_eq!(curve.len(), 101);
/// ```
pub fn kernel_density_estimation(
    data: &[f64],
    bandwidth: f64,
    grid_size: usize,
) -> Vec<DensityPoint> {
    if data.is_empty() {
        return Vec::new();
    }

    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / grid_size as f64;

    let norm = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
    let mut curve = Vec::with_capacity(grid_size + 1);

    for i in 0..=grid_size {
        let x = min + i as f64 * step;
        let mut density = 0.0;
        for point in data {
            let u = (x - point) / bandwidth;
            density += norm * (-0.5 * u * u).exp();
        }
        density /= data.len() as f64 * bandwidth;
        curve.push(DensityPoint { x, density });
    }

    curve
}

/// Equal-width histogram normalized to a density.
///
/// Each datum lands in bin `floor((value − min) / bin_width)`, clamped to
/// the last bin so the maximum value on the upper edge is absorbed. Counts
/// are divided by `n · bin_width`. Empty input, or a degenerate span with
/// zero bin width, returns no bins.
pub fn histogram(data: &[f64], bin_count: usize, range: HistogramRange) -> Vec<HistogramBin> {
    if data.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = match range {
        HistogramRange::DataSpan => data.iter().cloned().fold(f64::INFINITY, f64::min),
        HistogramRange::FromZero => 0.0,
    };

    let bin_width = (max - min) / bin_count as f64;
    if bin_width <= 0.0 || !bin_width.is_finite() {
        return Vec::new();
    }

    let mut counts = vec![0usize; bin_count];
    for &value in data {
        let idx = (((value - min) / bin_width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| HistogramBin {
            center: min + (idx as f64 + 0.5) * bin_width,
            density: count as f64 / (data.len() as f64 * bin_width),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::generate_standard_normal_with_rng;
    use crate::secure_rng::SecureRng;
    use assert_approx_eq::assert_approx_eq;

    fn normal_draws(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = SecureRng::with_seed(seed);
        let mut spare = None;
        (0..n)
            .map(|_| generate_standard_normal_with_rng(&mut rng, &mut spare))
            .collect()
    }

    #[test]
    fn test_kde_empty_input() {
        assert!(kernel_density_estimation(&[], 1.0, 100).is_empty());
    }

    #[test]
    fn test_kde_grid_spans_data() {
        let data = vec![2.0, 3.0, 7.0];
        let curve = kernel_density_estimation(&data, 0.5, 10);
        assert_eq!(curve.len(), 11);
        assert_approx_eq!(curve[0].x, 2.0, 1e-12);
        assert_approx_eq!(curve[10].x, 7.0, 1e-12);
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let data = normal_draws(1000, 3);
        let bw = silverman_bandwidth(1.0, data.len());
        let curve = kernel_density_estimation(&data, bw, 100);

        let step = curve[1].x - curve[0].x;
        let integral: f64 = curve.iter().map(|p| p.density * step).sum();
        // Mass beyond the data range is cut off, so within 5% is the
        // expected accuracy.
        assert_approx_eq!(integral, 1.0, 0.05);
    }

    #[test]
    fn test_kde_peaks_near_mode() {
        let data = normal_draws(2000, 11);
        let bw = silverman_bandwidth(1.0, data.len());
        let curve = kernel_density_estimation(&data, bw, 100);

        let peak = curve
            .iter()
            .max_by(|a, b| a.density.total_cmp(&b.density))
            .unwrap();
        assert!(peak.x.abs() < 0.5);
        // Standard normal mode density is 1/sqrt(2π) ≈ 0.3989.
        assert_approx_eq!(peak.density, 0.3989, 0.05);
    }

    #[test]
    fn test_silverman_bandwidth() {
        assert_approx_eq!(silverman_bandwidth(1.0, 500), 1.06 * 500f64.powf(-0.2), 1e-12);
        assert_approx_eq!(silverman_bandwidth(2.0, 1), 2.12, 1e-12);
    }

    #[test]
    fn test_histogram_empty_input() {
        assert!(histogram(&[], 10, HistogramRange::DataSpan).is_empty());
    }

    #[test]
    fn test_histogram_degenerate_span() {
        assert!(histogram(&[3.0, 3.0, 3.0], 10, HistogramRange::DataSpan).is_empty());
    }

    #[test]
    fn test_histogram_density_normalization() {
        let data = normal_draws(500, 21);
        let bins = histogram(&data, 30, HistogramRange::DataSpan);
        assert_eq!(bins.len(), 30);
        assert!(bins.iter().all(|b| b.density >= 0.0));

        let bin_width = bins[1].center - bins[0].center;
        let total: f64 = bins.iter().map(|b| b.density * bin_width).sum();
        assert_approx_eq!(total, 1.0, 1e-9);
    }

    #[test]
    fn test_histogram_maximum_lands_in_last_bin() {
        let data = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let bins = histogram(&data, 4, HistogramRange::DataSpan);
        // 4.0 sits exactly on the upper edge and must be clamped into the
        // last bin rather than indexed out of range.
        let bin_width = 1.0;
        assert_approx_eq!(bins[3].density, 2.0 / (5.0 * bin_width), 1e-12);
    }

    #[test]
    fn test_histogram_from_zero_range() {
        let data = vec![0.5, 1.5, 2.5, 3.5];
        let bins = histogram(&data, 4, HistogramRange::FromZero);
        assert_approx_eq!(bins[0].center, 0.4375, 1e-12);
        for bin in &bins {
            assert_approx_eq!(bin.density, 1.0 / (4.0 * 0.875), 1e-12);
        }
    }
}
