//! Simple Moving Average (SMA).
//!
//! Rolling mean of closes over a trailing window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let n = points.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let mut sum: f64 = points.iter().take(self.period).map(|p| p.close).sum();
        result[self.period - 1] = sum / self.period as f64;

        for i in self.period..n {
            sum += points[i].close - points[i - self.period].close;
            result[i] = sum / self.period as f64;
        }

        result
    }

    /// Mean of the trailing window only; avoids rolling-sum drift on long series.
    fn latest(&self, points: &[PricePoint]) -> Option<f64> {
        if points.len() < self.period {
            return None;
        }
        let window = &points[points.len() - self.period..];
        Some(window.iter().map(|p| p.close).sum::<f64>() / self.period as f64)
    }
}
