//! Signal fusion: map each indicator reading to a direction in [-1, 1] and
//! sum the weighted directions into one score in [-100, 100].
//!
//! Positive directions are bullish. Each contribution is worth at most
//! `weight * 100` points, so no indicator can outweigh its configured share.

use crate::config::FusionConfig;
use crate::indicators::{BollingerBands, IndicatorSet, MacdValues};
use serde::{Deserialize, Serialize};

/// Histogram (and line) magnitudes at or below `price * MACD_FLAT_TOLERANCE`
/// count as zero. Keeps float residue on flat series from voting.
const MACD_FLAT_TOLERANCE: f64 = 1e-9;

/// Primary sums at or below this magnitude have no dominant direction.
const DOMINANCE_EPSILON: f64 = 1e-9;

/// Band positions closer than this to the middle band do not vote.
const BOLLINGER_DEAD_ZONE: f64 = 0.05;

/// The five weighted inputs of the fused score, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    /// Price against the short SMA and the trend EMA.
    Trend,
    Bollinger,
    /// Momentum/volume tie-breaker.
    Momentum,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Trend,
        IndicatorKind::Bollinger,
        IndicatorKind::Momentum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Trend => "trend",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Momentum => "momentum",
        }
    }

    /// Everything but the tie-breaker, which only ever follows the others.
    pub fn is_primary(self) -> bool {
        !matches!(self, IndicatorKind::Momentum)
    }
}

/// One indicator's share of the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub kind: IndicatorKind,
    pub weight: f64,
    /// In [-1, 1].
    pub direction: f64,
    /// `weight * 100 * direction`.
    pub points: f64,
}

impl Contribution {
    pub fn new(kind: IndicatorKind, weight: f64, direction: f64) -> Self {
        let direction = normalize_zero(direction.clamp(-1.0, 1.0));
        Self {
            kind,
            weight,
            direction,
            points: normalize_zero(weight * 100.0 * direction),
        }
    }

    pub fn is_active(&self) -> bool {
        self.points != 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedScore {
    /// In [-100, 100]. NaN only if an input reading was NaN.
    pub score: f64,
    /// One entry per `IndicatorKind`, in `IndicatorKind::ALL` order.
    pub contributions: Vec<Contribution>,
}

impl FusedScore {
    pub fn contribution(&self, kind: IndicatorKind) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.kind == kind)
    }

    pub fn points(&self, kind: IndicatorKind) -> f64 {
        self.contribution(kind).map_or(0.0, |c| c.points)
    }

    /// Sum of absolute points across all contributions.
    pub fn absolute_total(&self) -> f64 {
        self.contributions.iter().map(|c| c.points.abs()).sum()
    }
}

/// Fuse an indicator snapshot into a score.
pub fn fuse(indicators: &IndicatorSet, price: f64, config: &FusionConfig) -> FusedScore {
    let weights = &config.weights;
    let primaries = [
        (IndicatorKind::Rsi, rsi_direction(indicators.rsi, config)),
        (IndicatorKind::Macd, macd_direction(&indicators.macd, price)),
        (
            IndicatorKind::Trend,
            trend_direction(price, indicators.sma20, indicators.ema50),
        ),
        (
            IndicatorKind::Bollinger,
            indicators
                .bollinger
                .as_ref()
                .map_or(0.0, |bands| bollinger_direction(bands, price)),
        ),
    ];

    let mut contributions: Vec<Contribution> = primaries
        .iter()
        .map(|&(kind, direction)| Contribution::new(kind, weights.weight(kind), direction))
        .collect();

    let primary_sum: f64 = contributions.iter().map(|c| c.points).sum();
    contributions.push(Contribution::new(
        IndicatorKind::Momentum,
        weights.momentum,
        tie_breaker_direction(
            primary_sum,
            indicators.momentum,
            indicators.volume_ratio,
            config.momentum_saturation,
        ),
    ));

    let score = contributions.iter().map(|c| c.points).sum::<f64>();
    FusedScore {
        score: normalize_zero(score.clamp(-100.0, 100.0)),
        contributions,
    }
}

/// +1 at or below oversold, -1 at or above overbought, linear through 0 at
/// the midpoint of the two.
pub fn rsi_direction(rsi: f64, config: &FusionConfig) -> f64 {
    let mid = (config.rsi_oversold + config.rsi_overbought) / 2.0;
    let direction = if rsi <= mid {
        (mid - rsi) / (mid - config.rsi_oversold)
    } else {
        (mid - rsi) / (config.rsi_overbought - mid)
    };
    direction.clamp(-1.0, 1.0)
}

/// Sign of the histogram, halved when the MACD line points the other way.
pub fn macd_direction(macd: &MacdValues, price: f64) -> f64 {
    let tolerance = price.abs() * MACD_FLAT_TOLERANCE;
    if macd.histogram.abs() <= tolerance {
        return 0.0;
    }
    let direction = macd.histogram.signum();
    if macd.line.abs() > tolerance && macd.line.signum() != direction {
        direction * 0.5
    } else {
        direction
    }
}

/// +1 above both averages, -1 below both, 0 when mixed or either is missing.
pub fn trend_direction(price: f64, sma: Option<f64>, ema: Option<f64>) -> f64 {
    match (sma, ema) {
        (Some(sma), Some(ema)) if price > sma && price > ema => 1.0,
        (Some(sma), Some(ema)) if price < sma && price < ema => -1.0,
        _ => 0.0,
    }
}

/// Mean-reversion read of the bands: the lower band is bullish, the upper
/// band bearish, with linear credit in between. Prices hugging the middle
/// band give 0.
pub fn bollinger_direction(bands: &BollingerBands, price: f64) -> f64 {
    let position = bands.position(price);
    if position.abs() < BOLLINGER_DEAD_ZONE {
        return 0.0;
    }
    -position
}

/// Confirmation of the primaries' dominant direction by momentum pointing
/// the same way, or by a volume surge. Never opposes the primaries; 0 when
/// they cancel out.
pub fn tie_breaker_direction(
    primary_sum: f64,
    momentum: Option<f64>,
    volume_ratio: Option<f64>,
    momentum_saturation: f64,
) -> f64 {
    if primary_sum.abs() <= DOMINANCE_EPSILON {
        return 0.0;
    }
    let dominant = primary_sum.signum();
    let from_momentum = momentum.map_or(0.0, |m| (m * dominant).max(0.0) / momentum_saturation);
    let from_volume = volume_ratio.map_or(0.0, |v| v - 1.0);
    let confirmation = from_momentum.max(from_volume).clamp(0.0, 1.0);
    dominant * confirmation
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
