//! Pure statistical transforms over numeric series.
//!
//! Every function is stateless and deterministic. Division guards are
//! explicit: an empty series is `StatsError::EmptyInput`, and a zero
//! divisor yields a 0.0 sentinel instead of NaN/Infinity, so no
//! non-finite value ever reaches a printer.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Errors from the statistical functions.
pub enum StatsError {
    #[error("empty input series")]
    EmptyInput,
}

/// Arithmetic mean of `series`.
pub fn mean(series: &[f64]) -> Result<f64, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(series.iter().sum::<f64>() / series.len() as f64)
}

/// Coefficient of variation as a percentage: `100 * stddev / mean`,
/// with the population standard deviation (divide by N, not N-1).
/// A zero mean yields 0.0.
pub fn coefficient_of_variation(series: &[f64]) -> Result<f64, StatsError> {
    let avg = mean(series)?;
    if avg == 0.0 {
        return Ok(0.0);
    }
    let variance = series.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / series.len() as f64;
    Ok(variance.sqrt() / avg * 100.0)
}

/// Percent change from `previous` to `current`. Policy: a zero
/// `previous` returns 0.0 rather than failing or producing NaN.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Mean of the first (or, with `from_end`, last) `window` elements.
/// A series shorter than `window` uses all available elements.
pub fn window_average(series: &[f64], window: usize, from_end: bool) -> Result<f64, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let n = window.min(series.len());
    let slice = if from_end {
        &series[series.len() - n..]
    } else {
        &series[..n]
    };
    mean(slice)
}

/// How many of the last `window` elements are strictly below `threshold`.
pub fn consecutive_below_threshold(series: &[f64], threshold: f64, window: usize) -> usize {
    let n = window.min(series.len());
    series[series.len() - n..]
        .iter()
        .filter(|v| **v < threshold)
        .count()
}

/// How many elements of the full series are strictly below `threshold`.
pub fn count_below_threshold(series: &[f64], threshold: f64) -> usize {
    series.iter().filter(|v| **v < threshold).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[60.0, 60.0, 60.0]).unwrap(), 60.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_mean_empty_is_an_error() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_cv_constant_series_is_zero() {
        assert_eq!(coefficient_of_variation(&[60.0, 60.0, 60.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cv_uses_population_stddev() {
        // stddev([2,4,4,4,5,5,7,9]) = 2 with the /N convention; mean = 5.
        let cv = coefficient_of_variation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((cv - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_cv_zero_mean_is_guarded() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(coefficient_of_variation(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(100.0, 80.0), -20.0);
        assert_eq!(percent_change(80.0, 100.0), 25.0);
    }

    #[test]
    fn test_percent_change_zero_previous_returns_zero() {
        let pc = percent_change(0.0, 50.0);
        assert_eq!(pc, 0.0);
        assert!(pc.is_finite());
    }

    #[test]
    fn test_window_average_both_ends() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(window_average(&s, 4, false).unwrap(), 2.5);
        assert_eq!(window_average(&s, 4, true).unwrap(), 6.5);
    }

    #[test]
    fn test_window_average_short_series_uses_all() {
        let s = [10.0, 20.0];
        assert_eq!(window_average(&s, 4, false).unwrap(), 15.0);
        assert_eq!(window_average(&s, 4, true).unwrap(), 15.0);
        assert_eq!(window_average(&[], 4, true), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_threshold_counters() {
        let s = [64.0, 58.0, 75.0, 55.0, 46.0, 50.0];
        assert_eq!(consecutive_below_threshold(&s, 60.0, 2), 2);
        assert_eq!(consecutive_below_threshold(&s, 60.0, 3), 3);
        assert_eq!(consecutive_below_threshold(&s, 46.0, 2), 0);
        assert_eq!(count_below_threshold(&s, 60.0), 4);
        // Strictly below: the boundary value itself does not count.
        assert_eq!(count_below_threshold(&[60.0], 60.0), 0);
    }
}
