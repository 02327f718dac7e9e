//! Descriptive statistics helpers
//!
//! Small numeric summaries used by the aggregation and analysis layers:
//! mean, median, percentiles. Groups are only computed over non-empty
//! partitions, so the empty-input case is reported as an error rather
//! than guarded with sentinel values.

use crate::error::{Error, Result};

pub mod distributions;

/// Arithmetic mean of a slice
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "Cannot compute mean of empty data".into(),
        ));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median of a slice
pub fn median(data: &[f64]) -> Result<f64> {
    percentile(data, 50.0)
}

/// Linear-interpolated percentile (p in [0, 100])
pub fn percentile(data: &[f64], p: f64) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "Cannot compute percentile of empty data".into(),
        ));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(Error::InvalidValue(format!(
            "Percentile must be in [0, 100], got {}",
            p
        )));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        Ok(sorted[lower])
    } else {
        let weight = rank - lower as f64;
        Ok(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> Result<f64> {
    if data.len() < 2 {
        return Err(Error::EmptyData(
            "Standard deviation requires at least two values".into(),
        ));
    }
    let m = mean(data)?;
    let variance =
        data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&data).unwrap(), 2.5);
        assert_eq!(median(&data).unwrap(), 2.5);
        assert_eq!(median(&[5.0, 1.0, 3.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&data, 0.0).unwrap(), 10.0);
        assert_eq!(percentile(&data, 100.0).unwrap(), 50.0);
        assert_eq!(percentile(&data, 25.0).unwrap(), 20.0);
    }

    #[test]
    fn test_empty_data_is_an_error() {
        assert!(mean(&[]).is_err());
        assert!(median(&[]).is_err());
        assert!(percentile(&[], 50.0).is_err());
    }
}
