//! Power-law analysis over logged entropy values.
//!
//! The analyzer only keeps the raw sample sequence; the histogram and
//! the exponent are recomputed from it on every run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Samples per unit in a histogram key (`floor(value * BIN_SCALE)`).
pub const BIN_SCALE: f64 = 100.0;

/// Floor applied to a non-positive minimum before taking logs.
const MIN_CLAMP: f64 = 0.01;

/// One histogram row with the fitted curve evaluated at the bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramRow {
    pub size: f64,
    pub frequency: u64,
    pub fit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLawReport {
    /// 0 when fewer than two samples were logged.
    pub exponent: f64,
    pub rows: Vec<HistogramRow>,
}

#[derive(Debug, Clone, Default)]
pub struct PowerLawAnalyzer {
    samples: Vec<f64>,
}

impl PowerLawAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation. No dedup, no bound.
    pub fn log_event(&mut self, value: f64) {
        self.samples.push(value);
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bin key → count, keys ascending.
    pub fn histogram(&self) -> BTreeMap<i64, u64> {
        let mut bins = BTreeMap::new();
        for &value in &self.samples {
            *bins.entry((value * BIN_SCALE).floor() as i64).or_insert(0) += 1;
        }
        bins
    }

    /// Estimate the tail exponent as `1 + n / Σ ln(x / xmin)`.
    ///
    /// Returns 0 with fewer than two samples. Fails with `DomainError`
    /// when the log sum is zero (every positive sample equals the minimum).
    pub fn fit_power_law(&self) -> Result<f64> {
        let n = self.samples.len();
        if n < 2 {
            return Ok(0.0);
        }
        let mut xmin = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        if xmin <= 0.0 {
            xmin = MIN_CLAMP;
        }
        let sum_log: f64 = self
            .samples
            .iter()
            .filter(|&&x| x > 0.0)
            .map(|&x| (x / xmin).ln())
            .sum();
        if sum_log == 0.0 {
            return Err(Error::DomainError(format!(
                "cannot fit power law: all {n} samples sit at the minimum {xmin}"
            )));
        }
        let exponent = 1.0 + n as f64 / sum_log;
        if !exponent.is_finite() {
            return Err(Error::DomainError(format!("power-law fit diverged (log sum {sum_log})")));
        }
        Ok(exponent)
    }

    /// Recompute histogram and exponent, with `size^(-exponent)` per bin.
    pub fn report(&self) -> Result<PowerLawReport> {
        let exponent = self.fit_power_law()?;
        let rows = self
            .histogram()
            .into_iter()
            .map(|(key, frequency)| {
                let size = key as f64 / BIN_SCALE;
                HistogramRow { size, frequency, fit: size.powf(-exponent) }
            })
            .collect();
        Ok(PowerLawReport { exponent, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(values: &[f64]) -> PowerLawAnalyzer {
        let mut a = PowerLawAnalyzer::new();
        for &v in values {
            a.log_event(v);
        }
        a
    }

    #[test]
    fn test_not_enough_data() {
        assert_eq!(analyzer(&[]).fit_power_law().unwrap(), 0.0);
        assert_eq!(analyzer(&[3.2]).fit_power_law().unwrap(), 0.0);
    }

    #[test]
    fn test_equal_samples_is_domain_error() {
        let err = analyzer(&[0.5, 0.5, 0.5]).fit_power_law().unwrap_err();
        assert!(matches!(err, Error::DomainError(_)));
    }

    #[test]
    fn test_known_fit() {
        // ln(1/1) + ln(e/1) = 1 → 1 + 2/1
        let alpha = analyzer(&[1.0, std::f64::consts::E]).fit_power_law().unwrap();
        assert!((alpha - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_minimum_is_clamped() {
        // xmin clamps to 0.01; only the positive sample contributes
        let alpha = analyzer(&[-1.0, 0.01 * std::f64::consts::E]).fit_power_law().unwrap();
        assert!((alpha - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_bins() {
        let bins = analyzer(&[0.123, 0.129, 1.5, 0.5]).histogram();
        let keys: Vec<_> = bins.keys().copied().collect();
        assert_eq!(keys, vec![12, 50, 150]);
        assert_eq!(bins[&12], 2);
    }

    #[test]
    fn test_report_rows_sorted_with_fit() {
        let report = analyzer(&[2.0, 0.5, 1.0]).report().unwrap();
        let sizes: Vec<_> = report.rows.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![0.5, 1.0, 2.0]);
        let row = report.rows[2];
        assert!((row.fit - 2.0f64.powf(-report.exponent)).abs() < 1e-12);
    }

    #[test]
    fn test_samples_keep_order() {
        let a = analyzer(&[0.3, 0.1, 0.3]);
        assert_eq!(a.samples(), &[0.3, 0.1, 0.3]);
    }
}
