//! Forecast error metrics
//!
//! The relative error used throughout the charts, plus the NaN-skipping
//! summary statistics that feed chart titles.

/// Relative error of a forecast, in percent.
///
/// Each element is `(pred - true) / max(pred, true) * 100`, with the ratio
/// clamped to `[-1, 1]` before scaling. With `use_abs` the numerator is
/// `|pred - true|`, so the result is non-negative whenever the maximum is
/// positive; when both values are negative and differ it clamps to -100.
///
/// The denominator is the signed pointwise maximum, so a sign change between
/// `true` and `pred` can push the ratio past ±1; the clamp bounds it, and
/// infinities from a zero denominator become ±100. When both values are zero
/// the ratio is NaN and is returned as NaN: neither clamp applies to it.
///
/// # Example
///
/// ```rust
/// use oilfield_charts::metrics::relative_error;
///
/// let err = relative_error(&[100.0, 100.0], &[150.0, 50.0], false);
/// assert!((err[0] - 33.333).abs() < 1e-3);
/// assert_eq!(err[1], -50.0);
/// ```
pub fn relative_error(y_true: &[f64], y_pred: &[f64], use_abs: bool) -> Vec<f64> {
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let diff = if use_abs { (p - t).abs() } else { p - t };
            clamp_ratio(diff / maximum(p, t)) * 100.0
        })
        .collect()
}

/// Pointwise maximum that propagates NaN (`f64::max` would drop it).
fn maximum(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio > 1.0 {
        1.0
    } else if ratio < -1.0 {
        -1.0
    } else {
        ratio
    }
}

/// Arithmetic mean, skipping NaN. NaN when nothing remains.
pub fn mean(values: &[f64]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Sample standard deviation (n - 1 denominator), skipping NaN.
///
/// NaN when fewer than two values remain.
pub fn std_dev(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.len() < 2 {
        return f64::NAN;
    }
    let m = mean(&finite);
    let ss: f64 = finite.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (finite.len() - 1) as f64).sqrt()
}

/// Whether every value is exactly zero. True for an empty slice; NaN is not zero.
pub fn all_zero(values: &[f64]) -> bool {
    values.iter().all(|&v| v == 0.0)
}
