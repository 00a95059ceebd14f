//! Shared statistics: mean, sample variance, Pearson correlation
//!
//! Every function is total: degenerate input yields 0, never NaN.

use crate::MIN_CORRELATION_POINTS;

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n - 1), 0 for fewer than two values
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Pearson correlation over the first `min(x.len(), y.len())` positions
///
/// Returns 0 when fewer than 3 aligned points exist or either side has zero
/// variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < MIN_CORRELATION_POINTS {
        return 0.0;
    }

    let a = &x[..n];
    let b = &y[..n];
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut numerator = 0.0;
    let mut denom_a = 0.0;
    let mut denom_b = 0.0;

    for (va, vb) in a.iter().zip(b) {
        let da = va - mean_a;
        let db = vb - mean_b;
        numerator += da * db;
        denom_a += da * da;
        denom_b += db * db;
    }

    let denominator = (denom_a * denom_b).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (numerator / denominator).clamp(-1.0, 1.0)
}

/// Round to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(sample_variance(&[5.0]), 0.0);
        assert!((sample_variance(&[2.0, 4.0, 6.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_series_correlate_perfectly() {
        let x = [10.0, 40.0, 25.0, 80.0, 55.0];
        let r = pearson_correlation(&x, &x);
        assert!((r - 1.0).abs() < 1e-9, "expected 1.0, got {}", r);
    }

    #[test]
    fn test_negated_series_correlate_negatively() {
        let x = [10.0, 40.0, 25.0, 80.0, 55.0];
        let m = mean(&x);
        let y: Vec<f64> = x.iter().map(|v| 2.0 * m - v).collect();
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 1e-9, "expected -1.0, got {}", r);
    }

    #[test]
    fn test_constant_series_is_zero() {
        let constant = [50.0; 6];
        let other = [1.0, 9.0, 3.0, 7.0, 2.0, 8.0];
        assert_eq!(pearson_correlation(&constant, &other), 0.0);
        assert_eq!(pearson_correlation(&other, &constant), 0.0);
        assert_eq!(pearson_correlation(&constant, &constant), 0.0);
    }

    #[test]
    fn test_short_series_is_zero() {
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[2.0, 1.0]), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_aligns_to_shorter_length() {
        let x = [1.0, 2.0, 3.0, 4.0, 100.0, -50.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 2), 0.12);
        assert_eq!(round_to(-0.4567, 3), -0.457);
    }
}
