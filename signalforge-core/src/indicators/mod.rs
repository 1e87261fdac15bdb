//! Indicator calculator.
//!
//! Each indicator implements the `Indicator` trait: price history in, a
//! same-length numeric series out, `NaN` during warm-up. The analysis only
//! needs the value at the latest point, which `IndicatorSet::compute` reads
//! off the end of each series and pairs with the documented fallback when the
//! history is too short.
//!
//! Multi-series indicators (MACD, Bollinger) are exposed as separate named
//! instances per output, keeping the single-series trait unchanged.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod set;
pub mod sma;
pub mod volume;

pub use bollinger::{Bollinger, BollingerBand, BollingerBands};
pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdOutput, MacdReading, MacdStatus, MacdValues};
pub use momentum::Momentum;
pub use rsi::Rsi;
pub use set::IndicatorSet;
pub use sma::Sma;
pub use volume::VolumeRatio;

use crate::domain::PricePoint;

/// Trait for indicators.
///
/// Inputs are expected to come from a validated `PriceSeries` (finite,
/// positive prices).
///
/// # Look-ahead guard
/// No value at index t may depend on points after t. Every indicator must
/// pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of points needed before the first valid output index.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole history.
    ///
    /// Returns a `Vec<f64>` of the same length as `points`, `NaN` where the
    /// indicator is not yet defined.
    fn compute(&self, points: &[PricePoint]) -> Vec<f64>;

    /// Value at the last point, `None` while still warming up.
    fn latest(&self, points: &[PricePoint]) -> Option<f64> {
        self.compute(points)
            .last()
            .copied()
            .filter(|v| v.is_finite())
    }
}

/// Create synthetic points from close prices for testing.
///
/// open = prev_close (or close for the first point), high = max(open,close) + 1.0,
/// low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_points(closes: &[f64]) -> Vec<PricePoint> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PricePoint {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
