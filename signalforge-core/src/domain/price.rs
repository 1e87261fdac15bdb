//! PricePoint and PriceSeries — the engine's input.

use crate::error::AnalysisError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks a single point in isolation: finite, positive prices,
    /// `high >= low`, non-negative volume.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteValue {
                    date: self.date,
                    field,
                });
            }
            if value <= 0.0 {
                return Err(AnalysisError::NonPositivePrice {
                    date: self.date,
                    field,
                    value,
                });
            }
        }
        if !self.volume.is_finite() {
            return Err(AnalysisError::NonFiniteValue {
                date: self.date,
                field: "volume",
            });
        }
        if self.volume < 0.0 {
            return Err(AnalysisError::NegativeVolume {
                date: self.date,
                volume: self.volume,
            });
        }
        if self.high < self.low {
            return Err(AnalysisError::InvalidRange {
                date: self.date,
                high: self.high,
                low: self.low,
            });
        }
        Ok(())
    }
}

/// A validated, oldest-first sequence of price points.
///
/// The only way to build one is through [`PriceSeries::new`] (or the serde
/// `try_from` hook), so a `PriceSeries` is never empty, never unordered and
/// never carries a non-finite price. Indicators can rely on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        if points.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        for point in &points {
            point.validate()?;
        }
        for pair in points.windows(2) {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(AnalysisError::DuplicateDate(current));
            }
            if current < previous {
                return Err(AnalysisError::UnorderedDates { previous, current });
            }
        }
        Ok(Self { points })
    }

    /// Build a daily series from closing prices alone.
    ///
    /// open = previous close (close for the first day), high/low bracket
    /// open and close, constant volume. Handy for callers that only track
    /// closes, and for tests.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self, AnalysisError> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open = if i == 0 { close } else { closes[i - 1] };
                PricePoint {
                    date: start + chrono::Duration::days(i as i64),
                    open,
                    high: open.max(close),
                    low: open.min(close),
                    close,
                    volume: 1_000_000.0,
                }
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent point.
    pub fn latest(&self) -> &PricePoint {
        // Non-empty by construction.
        &self.points[self.points.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// BLAKE3 digest over every field of every point, hex-encoded.
    ///
    /// Two series with identical points produce identical digests, so a
    /// caching collaborator can key recommendations by input.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for p in &self.points {
            hasher.update(p.date.to_string().as_bytes());
            for value in [p.open, p.high, p.low, p.close, p.volume] {
                hasher.update(&value.to_le_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = AnalysisError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
