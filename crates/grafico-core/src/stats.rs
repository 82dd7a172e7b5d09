// File: crates/grafico-core/src/stats.rs
// Summary: Descriptive statistics over slices of finite numbers.
// Notes:
// - `variance`/`standard_deviation` use the sample (n - 1) denominator and
//   therefore need at least two values; shorter input is rejected instead of
//   producing NaN.

use crate::error::{ChartError, Result};

fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ChartError::invalid(format!("value at index {i} is not finite"))),
        None => Ok(()),
    }
}

fn ensure_non_empty(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(ChartError::invalid(format!("{what} of an empty sequence is undefined")));
    }
    ensure_finite(values)
}

/// Sum of all values; 0 for an empty slice.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn min(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "min")?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "max")?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values, "mean")?;
    Ok(sum(values) / values.len() as f64)
}

/// Sample variance.
/// Contract: `values.len() >= 2`, all values finite.
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(ChartError::invalid(format!(
            "variance needs at least two values, got {}",
            values.len()
        )));
    }
    let m = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(squares / (values.len() - 1) as f64)
}

/// Square root of the sample variance. Same contract as [`variance`].
pub fn standard_deviation(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Round half towards positive infinity, the way browsers round.
/// `f64::round` rounds half away from zero, which differs for negative halves.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round `value` to `digits` decimal places (half-up).
pub fn round_to(value: f64, digits: i32) -> f64 {
    let multiplier = 10f64.powi(digits);
    round_half_up(value * multiplier) / multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_statistics() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(sum(&v), 40.0);
        assert_eq!(min(&v).unwrap(), 2.0);
        assert_eq!(max(&v).unwrap(), 9.0);
        assert_eq!(mean(&v).unwrap(), 5.0);
        assert!((variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(matches!(min(&[]), Err(ChartError::InvalidInput(_))));
        assert!(matches!(variance(&[1.0]), Err(ChartError::InvalidInput(_))));
        assert!(matches!(standard_deviation(&[]), Err(ChartError::InvalidInput(_))));
        assert!(matches!(mean(&[1.0, f64::NAN]), Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn half_up_rounding_matches_browsers() {
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(1.5), 2.0);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(0.1 + 0.2, 3), 0.3);
    }
}
