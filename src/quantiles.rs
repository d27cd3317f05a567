//! Closed-form quantile approximations.
//!
//! The control-limit computation needs the inverse standard-normal CDF and
//! an inverse chi-square CDF. Both are implemented as closed-form
//! approximations: Acklam's rational approximation for the normal quantile
//! (about 1.15e-9 relative error, no iterative refinement) and the
//! Wilson-Hilferty cube-root transform for the chi-square quantile. The
//! chi-square approximation loses accuracy for small degrees of freedom
//! (below 5) and extreme probabilities; callers must not expect exactness
//! there.

/// Break-point below which the lower-tail branch of Acklam's approximation
/// applies; the upper tail starts at `1 - P_LOW`.
const P_LOW: f64 = 0.02425;

const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Inverse CDF of the standard normal distribution (Acklam's algorithm).
///
/// Branches into lower tail, central region, and upper tail, each evaluated
/// with a distinct rational polynomial. `p <= 0` returns negative infinity
/// and `p >= 1` returns positive infinity.
///
/// # Example
/// ```rust
/// use mspc_engine::quantiles::normal_quantile;
///
/// assert!(normal_quantile(0.5).abs() < 1e-9);
/// assert!((normal_quantile(0.975) - 1.959964).abs() < 1e-5);
/// ```
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let p_high = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Chi-square quantile via the Wilson-Hilferty cube-root transform.
///
/// Computes `df · (1 − 2/(9·df) + z·sqrt(2/(9·df)))³` where `z` is the
/// standard normal quantile of `p`.
pub fn chi_square_quantile(p: f64, degrees_of_freedom: f64) -> f64 {
    let df = degrees_of_freedom;
    let z = normal_quantile(p);
    df * (1.0 - 2.0 / (9.0 * df) + z * (2.0 / (9.0 * df)).sqrt()).powi(3)
}
