// Weight estimation - median of the collected totals plus a fixed offset
//
// The median is the only noise rejection applied. Single-corner glitches and
// foot shuffling produce sparse outliers that would drag a mean.

use crate::error::MeasurementError;

/// Median and adjusted weight for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub median: f64,
    pub adjusted: f64,
}

/// Standard median; even-length input averages the two middle values.
pub fn median(values: &[f64]) -> Result<f64, MeasurementError> {
    if values.is_empty() {
        return Err(MeasurementError::NoSamples);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Median of `collected` shifted by `adjust` kilograms.
pub fn estimate(collected: &[f64], adjust: f64) -> Result<Estimate, MeasurementError> {
    let median = median(collected)?;
    Ok(Estimate {
        median,
        adjusted: median + adjust,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_length_with_negative_adjust() {
        let estimate = estimate(&[40.0, 42.0, 41.0], -1.0).unwrap();
        assert_eq!(estimate.median, 41.0);
        assert_eq!(estimate.adjusted, 40.0);
    }

    #[test]
    fn test_even_length_averages_middle() {
        assert_eq!(median(&[40.0, 44.0]).unwrap(), 42.0);
        assert_eq!(median(&[1.0, 9.0, 3.0, 5.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_outliers_suppressed() {
        let totals = [80.1, 80.2, 3.0, 80.0, 80.1, 190.0, 80.2];
        assert_eq!(median(&totals).unwrap(), 80.1);
    }

    #[test]
    fn test_single_value() {
        let estimate = estimate(&[72.5], 0.0).unwrap();
        assert_eq!(estimate.median, 72.5);
        assert_eq!(estimate.adjusted, 72.5);
    }

    #[test]
    fn test_empty_input_errors() {
        assert_eq!(median(&[]), Err(MeasurementError::NoSamples));
        assert_eq!(estimate(&[], 2.0), Err(MeasurementError::NoSamples));
    }
}
