//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::PricePoint;
use serde::{Deserialize, Serialize};

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

/// All three bands at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width as a percentage of the middle band.
    pub fn width_pct(&self) -> f64 {
        if self.middle > 0.0 {
            (self.upper - self.lower) / self.middle * 100.0
        } else {
            0.0
        }
    }

    /// Where `price` sits inside the bands: -1 at the lower band, 0 at the
    /// middle, +1 at the upper band, clamped to [-1, 1]. Collapsed bands
    /// (zero stddev) report 0.
    pub fn position(&self, price: f64) -> f64 {
        let half_width = self.upper - self.middle;
        if half_width <= self.middle.abs() * 1e-12 {
            return 0.0;
        }
        ((price - self.middle) / half_width).clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower)
    }

    fn with_band(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    /// All three bands over the trailing window ending at the last point.
    pub fn latest_bands(
        points: &[PricePoint],
        period: usize,
        multiplier: f64,
    ) -> Option<BollingerBands> {
        if period == 0 || points.len() < period {
            return None;
        }
        Some(window_bands(&points[points.len() - period..], multiplier))
    }
}

fn window_bands(window: &[PricePoint], multiplier: f64) -> BollingerBands {
    let n = window.len() as f64;
    let mean = window.iter().map(|p| p.close).sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|p| {
            let diff = p.close - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();
    BollingerBands {
        upper: mean + multiplier * stddev,
        middle: mean,
        lower: mean - multiplier * stddev,
    }
}

impl Indicator for Bollinger {
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

        for i in (self.period - 1)..n {
            let bands = window_bands(&points[i + 1 - self.period..=i], self.multiplier);
            result[i] = match self.band {
                BollingerBand::Upper => bands.upper,
                BollingerBand::Middle => bands.middle,
                BollingerBand::Lower => bands.lower,
            };
        }

        result
    }
}
