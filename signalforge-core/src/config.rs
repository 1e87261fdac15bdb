//! Analysis configuration: indicator periods, fusion weights, resolver thresholds.
//!
//! Every tunable number lives here under a named default, so tests (and the
//! CLI's `--config` file) can perturb thresholds without touching indicator
//! math. All sections use `#[serde(default)]`, so a TOML file only needs the
//! keys it changes.

use crate::fusion::IndicatorKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;
pub const DEFAULT_SMA_SHORT: usize = 20;
pub const DEFAULT_SMA_MEDIUM: usize = 50;
pub const DEFAULT_SMA_LONG: usize = 200;
pub const DEFAULT_EMA_TREND: usize = 50;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MOMENTUM_PERIOD: usize = 10;
pub const DEFAULT_VOLUME_PERIOD: usize = 20;

/// RSI reported when the history is too short to compute one.
pub const NEUTRAL_RSI: f64 = 50.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Momentum (percent) at which the tie-breaker reaches full confirmation.
pub const MOMENTUM_SATURATION: f64 = 10.0;

pub const BUY_THRESHOLD: f64 = 40.0;
pub const SELL_THRESHOLD: f64 = -40.0;
pub const CONFIDENCE_FLOOR: f64 = 70.0;
pub const CONFIDENCE_CEILING: f64 = 98.0;
pub const HOLD_CONFIDENCE_MAX: f64 = 65.0;
pub const HOLD_CONFIDENCE_MIN: f64 = 45.0;
pub const INSUFFICIENT_DATA_CONFIDENCE: f64 = 50.0;
pub const TARGET_PREMIUM: f64 = 0.10;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Errors raised by configuration parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config as TOML: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("fusion weights must sum to 1.0 (got {0})")]
    WeightSum(f64),

    #[error("weight for {kind} must be finite and non-negative (got {value})")]
    InvalidWeight { kind: &'static str, value: f64 },

    #[error("{0} must be >= 1")]
    ZeroPeriod(&'static str),

    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdPeriods { fast: usize, slow: usize },

    #[error("invalid threshold: {0}")]
    Threshold(String),
}

/// Lookback periods and band width for the indicator calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_short: usize,
    pub sma_medium: usize,
    pub sma_long: usize,
    pub ema_trend: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub momentum_period: usize,
    pub volume_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            macd_fast: DEFAULT_MACD_FAST,
            macd_slow: DEFAULT_MACD_SLOW,
            macd_signal: DEFAULT_MACD_SIGNAL,
            sma_short: DEFAULT_SMA_SHORT,
            sma_medium: DEFAULT_SMA_MEDIUM,
            sma_long: DEFAULT_SMA_LONG,
            ema_trend: DEFAULT_EMA_TREND,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
            momentum_period: DEFAULT_MOMENTUM_PERIOD,
            volume_period: DEFAULT_VOLUME_PERIOD,
        }
    }
}

/// Per-indicator weights. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub rsi: f64,
    pub macd: f64,
    pub trend: f64,
    pub bollinger: f64,
    pub momentum: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            rsi: 0.25,
            macd: 0.25,
            trend: 0.20,
            bollinger: 0.20,
            momentum: 0.10,
        }
    }
}

impl FusionWeights {
    pub fn weight(&self, kind: IndicatorKind) -> f64 {
        match kind {
            IndicatorKind::Rsi => self.rsi,
            IndicatorKind::Macd => self.macd,
            IndicatorKind::Trend => self.trend,
            IndicatorKind::Bollinger => self.bollinger,
            IndicatorKind::Momentum => self.momentum,
        }
    }

    pub fn sum(&self) -> f64 {
        IndicatorKind::ALL.iter().map(|&k| self.weight(k)).sum()
    }
}

/// Signal fuser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub momentum_saturation: f64,
    pub weights: FusionWeights,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: RSI_OVERSOLD,
            rsi_overbought: RSI_OVERBOUGHT,
            momentum_saturation: MOMENTUM_SATURATION,
            weights: FusionWeights::default(),
        }
    }
}

/// Recommendation resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    pub confidence_floor: f64,
    pub confidence_ceiling: f64,
    pub hold_confidence_max: f64,
    pub hold_confidence_min: f64,
    pub insufficient_data_confidence: f64,
    pub target_premium_up: f64,
    pub target_premium_down: f64,
    /// Bollinger bandwidth (percent of the middle band) above which risk is high.
    pub high_risk_bandwidth: f64,
    /// Bollinger bandwidth below which risk may be low.
    pub low_risk_bandwidth: f64,
    /// |momentum| (percent) above which risk is high.
    pub high_risk_momentum: f64,
    /// |momentum| below which risk may be low.
    pub low_risk_momentum: f64,
    /// Share of absolute fused points an indicator group needs to set the horizon.
    pub horizon_dominance: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            buy_threshold: BUY_THRESHOLD,
            sell_threshold: SELL_THRESHOLD,
            confidence_floor: CONFIDENCE_FLOOR,
            confidence_ceiling: CONFIDENCE_CEILING,
            hold_confidence_max: HOLD_CONFIDENCE_MAX,
            hold_confidence_min: HOLD_CONFIDENCE_MIN,
            insufficient_data_confidence: INSUFFICIENT_DATA_CONFIDENCE,
            target_premium_up: TARGET_PREMIUM,
            target_premium_down: TARGET_PREMIUM,
            high_risk_bandwidth: 15.0,
            low_risk_bandwidth: 5.0,
            high_risk_momentum: 10.0,
            low_risk_momentum: 3.0,
            horizon_dominance: 0.6,
        }
    }
}

/// The single configuration structure handed to the calculator, fuser and resolver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub fusion: FusionConfig,
    pub resolver: ResolverConfig,
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Shortest series that gets a real recommendation: one RSI window plus
    /// the seed point. Anything shorter resolves to the insufficient-data HOLD.
    pub fn min_history(&self) -> usize {
        self.indicators.rsi_period + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        let periods = [
            ("rsi_period", ind.rsi_period),
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("sma_short", ind.sma_short),
            ("sma_medium", ind.sma_medium),
            ("sma_long", ind.sma_long),
            ("ema_trend", ind.ema_trend),
            ("bollinger_period", ind.bollinger_period),
            ("momentum_period", ind.momentum_period),
            ("volume_period", ind.volume_period),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod(name));
            }
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::MacdPeriods {
                fast: ind.macd_fast,
                slow: ind.macd_slow,
            });
        }
        if !(ind.bollinger_multiplier.is_finite() && ind.bollinger_multiplier > 0.0) {
            return Err(ConfigError::Threshold(format!(
                "bollinger_multiplier must be positive (got {})",
                ind.bollinger_multiplier
            )));
        }

        let weights = &self.fusion.weights;
        for kind in IndicatorKind::ALL {
            let value = weights.weight(kind);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    kind: kind.label(),
                    value,
                });
            }
        }
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }

        let fusion = &self.fusion;
        if !(0.0 < fusion.rsi_oversold
            && fusion.rsi_oversold < fusion.rsi_overbought
            && fusion.rsi_overbought < 100.0)
        {
            return Err(ConfigError::Threshold(format!(
                "RSI bands must satisfy 0 < oversold < overbought < 100 (got {} / {})",
                fusion.rsi_oversold, fusion.rsi_overbought
            )));
        }
        if !(fusion.momentum_saturation.is_finite() && fusion.momentum_saturation > 0.0) {
            return Err(ConfigError::Threshold(format!(
                "momentum_saturation must be positive (got {})",
                fusion.momentum_saturation
            )));
        }

        let res = &self.resolver;
        if !(0.0 < res.buy_threshold && res.buy_threshold < 100.0) {
            return Err(ConfigError::Threshold(format!(
                "buy_threshold must be in (0, 100) (got {})",
                res.buy_threshold
            )));
        }
        if !(-100.0 < res.sell_threshold && res.sell_threshold < 0.0) {
            return Err(ConfigError::Threshold(format!(
                "sell_threshold must be in (-100, 0) (got {})",
                res.sell_threshold
            )));
        }
        if !(0.0 <= res.confidence_floor
            && res.confidence_floor <= res.confidence_ceiling
            && res.confidence_ceiling <= 100.0)
        {
            return Err(ConfigError::Threshold(format!(
                "confidence must satisfy 0 <= floor <= ceiling <= 100 (got {} / {})",
                res.confidence_floor, res.confidence_ceiling
            )));
        }
        if !(0.0 <= res.hold_confidence_min
            && res.hold_confidence_min <= res.hold_confidence_max
            && res.hold_confidence_max < res.confidence_floor)
        {
            return Err(ConfigError::Threshold(format!(
                "HOLD confidence must satisfy 0 <= min <= max < directional floor (got {} / {} / {})",
                res.hold_confidence_min, res.hold_confidence_max, res.confidence_floor
            )));
        }
        if !(0.0..=100.0).contains(&res.insufficient_data_confidence) {
            return Err(ConfigError::Threshold(format!(
                "insufficient_data_confidence must be in [0, 100] (got {})",
                res.insufficient_data_confidence
            )));
        }
        if !(0.0 < res.target_premium_up && 0.0 < res.target_premium_down && res.target_premium_down < 1.0)
        {
            return Err(ConfigError::Threshold(format!(
                "target premiums must be positive and the downside premium below 1 (got {} / {})",
                res.target_premium_up, res.target_premium_down
            )));
        }
        if !(0.0 < res.horizon_dominance && res.horizon_dominance <= 1.0) {
            return Err(ConfigError::Threshold(format!(
                "horizon_dominance must be in (0, 1] (got {})",
                res.horizon_dominance
            )));
        }
        Ok(())
    }
}
