//! Recommendation — the engine's output value object.

use crate::indicators::IndicatorSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final directional call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeHorizon::Short => "short",
            TimeHorizon::Medium => "medium",
            TimeHorizon::Long => "long",
        })
    }
}

/// Result of one analysis call.
///
/// Built once by the resolver and never mutated. Field names serialize in
/// camelCase for UI and cache consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub symbol: String,
    pub signal: Signal,
    /// 0..=100.
    pub confidence: f64,
    /// Fused score in [-100, 100] that the signal was resolved from.
    pub score: f64,
    pub current_price: f64,
    pub target_price: f64,
    pub indicators: IndicatorSet,
    pub reasoning: Vec<String>,
    pub risk_level: RiskLevel,
    pub time_horizon: TimeHorizon,
}

impl Recommendation {
    /// BLAKE3 digest of the canonical JSON form.
    ///
    /// Identical inputs must produce identical fingerprints; the determinism
    /// tests compare these.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).expect("Recommendation must serialize");
        blake3::hash(&json).to_hex().to_string()
    }
}
