//! Momentum — percentage change over a fixed lookback.
//!
//! momentum[t] = (close[t] - close[t-period]) / close[t-period] * 100
//! Lookback: period.

use super::Indicator;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self {
            period,
            name: format!("momentum_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let n = points.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            let prev = points[i - self.period].close;
            // Validated series never carry a zero close; guard anyway so NaN
            // cannot leak into fusion.
            if prev > 0.0 {
                result[i] = (points[i].close - prev) / prev * 100.0;
            }
        }

        result
    }
}
