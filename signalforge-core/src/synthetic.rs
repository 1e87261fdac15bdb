//! Deterministic synthetic price series.
//!
//! Stands in for a market-data collaborator: a seeded random walk over
//! weekdays. The same parameters and seed always produce the same series.

use crate::domain::{PricePoint, PriceSeries};
use crate::error::AnalysisError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-walk parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomWalk {
    pub start: NaiveDate,
    pub start_price: f64,
    /// Number of trading days (weekends are skipped).
    pub days: usize,
    /// Mean daily return, e.g. 0.001 for +0.1%.
    pub drift: f64,
    /// Daily returns are drawn uniformly from `drift ± volatility`.
    pub volatility: f64,
    pub base_volume: f64,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default(),
            start_price: 100.0,
            days: 250,
            drift: 0.0,
            volatility: 0.03,
            base_volume: 2_000_000.0,
        }
    }
}

impl RandomWalk {
    /// Generate the series for `seed`.
    ///
    /// Returns the series validation error if the parameters yield an
    /// invalid series (zero days, non-positive start price).
    pub fn generate(&self, seed: u64) -> Result<PriceSeries, AnalysisError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut points = Vec::with_capacity(self.days);
        let mut price = self.start_price;
        let mut current = self.start;
        let spread = self.volatility.abs();

        while points.len() < self.days {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += Duration::days(1);
                continue;
            }

            let daily_return = if spread > 0.0 {
                self.drift + rng.gen_range(-spread..spread)
            } else {
                self.drift
            };
            let open = price;
            // Floor keeps a long losing streak from reaching zero.
            let close = (price * (1.0 + daily_return)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = (self.base_volume * rng.gen_range(0.5..1.5)).round();

            points.push(PricePoint::new(current, open, high, low, close, volume));
            price = close;
            current += Duration::days(1);
        }

        PriceSeries::new(points)
    }
}

/// Deterministic seed derived from a symbol name.
pub fn symbol_seed(symbol: &str) -> u64 {
    let hash = blake3::hash(symbol.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
