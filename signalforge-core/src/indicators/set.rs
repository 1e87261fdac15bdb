//! Snapshot of every indicator at the latest point of a series.

use super::{
    Bollinger, BollingerBands, Ema, Indicator, Macd, MacdStatus, MacdValues, Momentum, Rsi, Sma,
    VolumeRatio,
};
use crate::config::{IndicatorConfig, NEUTRAL_RSI};
use crate::domain::PriceSeries;
use crate::error::DataWarning;
use serde::{Deserialize, Serialize};

/// Indicator readings at the last point of a series.
///
/// Moving-average fields are named after their default periods; the actual
/// periods come from `IndicatorConfig`. `None` means the history was too
/// short and the reading takes no part in fusion. RSI and MACD are always
/// present thanks to their fallbacks, and every fallback or missing reading
/// leaves an entry in `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    /// 0..=100, 50 when the history is too short.
    pub rsi: f64,
    pub macd: MacdValues,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub ema50: Option<f64>,
    pub bollinger: Option<BollingerBands>,
    /// Percent change over the momentum period.
    pub momentum: Option<f64>,
    /// Latest volume over its trailing average. Auxiliary, never warned about.
    pub volume_ratio: Option<f64>,
    pub warnings: Vec<DataWarning>,
}

impl IndicatorSet {
    /// Compute every indicator over `series`.
    ///
    /// `config` must have passed `AnalysisConfig::validate` (all periods >= 1).
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Self {
        let points = series.points();
        let n = points.len();
        let mut warnings = Vec::new();

        let rsi_indicator = Rsi::new(config.rsi_period);
        let rsi = match rsi_indicator.latest(points) {
            Some(v) => v,
            None => {
                warnings.push(DataWarning::insufficient(
                    rsi_indicator.name(),
                    config.rsi_period + 1,
                    n,
                ));
                NEUTRAL_RSI
            }
        };

        let reading =
            Macd::latest_reading(points, config.macd_fast, config.macd_slow, config.macd_signal);
        if reading.status != MacdStatus::Full {
            warnings.push(DataWarning::insufficient(
                format!(
                    "macd_{}_{}_{}",
                    config.macd_fast, config.macd_slow, config.macd_signal
                ),
                config.macd_slow + config.macd_signal,
                n,
            ));
        }

        let bollinger =
            Bollinger::latest_bands(points, config.bollinger_period, config.bollinger_multiplier);
        if bollinger.is_none() {
            warnings.push(DataWarning::insufficient(
                format!(
                    "bollinger_{}_{}",
                    config.bollinger_period, config.bollinger_multiplier
                ),
                config.bollinger_period,
                n,
            ));
        }

        let mut optional = |indicator: &dyn Indicator| -> Option<f64> {
            let value = indicator.latest(points);
            if value.is_none() {
                warnings.push(DataWarning::insufficient(
                    indicator.name(),
                    indicator.lookback() + 1,
                    n,
                ));
            }
            value
        };

        let sma20 = optional(&Sma::new(config.sma_short));
        let sma50 = optional(&Sma::new(config.sma_medium));
        let sma200 = optional(&Sma::new(config.sma_long));
        let ema50 = optional(&Ema::new(config.ema_trend));
        let momentum = optional(&Momentum::new(config.momentum_period));

        let volume_ratio = VolumeRatio::new(config.volume_period).latest(points);

        Self {
            rsi,
            macd: reading.values,
            sma20,
            sma50,
            sma200,
            ema50,
            bollinger,
            momentum,
            volume_ratio,
            warnings,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), closes).unwrap()
    }

    fn warned(set: &IndicatorSet, name: &str) -> bool {
        set.warnings.iter().any(|w| match w {
            DataWarning::InsufficientData { indicator, .. } => indicator == name,
        })
    }

    #[test]
    fn long_history_is_complete() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0).collect();
        let set = IndicatorSet::compute(&series(&closes), &IndicatorConfig::default());
        assert!(!set.is_degraded(), "unexpected warnings: {:?}", set.warnings);
        assert!(set.sma200.is_some());
        assert!(set.ema50.is_some());
        assert!(set.bollinger.is_some());
        assert!((0.0..=100.0).contains(&set.rsi));
    }

    #[test]
    fn thirty_points_degrade_long_lookbacks_only() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let set = IndicatorSet::compute(&series(&closes), &IndicatorConfig::default());

        assert!(set.sma20.is_some());
        assert!(set.bollinger.is_some());
        assert!(set.momentum.is_some());
        assert_eq!(set.sma50, None);
        assert_eq!(set.sma200, None);
        assert_eq!(set.ema50, None);

        assert!(warned(&set, "sma_50"));
        assert!(warned(&set, "sma_200"));
        assert!(warned(&set, "ema_50"));
        assert!(warned(&set, "macd_12_26_9"));
        assert!(!warned(&set, "rsi_14"));
        assert_eq!(set.macd.histogram, 0.0);
    }

    #[test]
    fn five_points_fall_back_everywhere() {
        let set = IndicatorSet::compute(
            &series(&[10.0, 11.0, 10.5, 10.8, 11.2]),
            &IndicatorConfig::default(),
        );
        assert_eq!(set.rsi, NEUTRAL_RSI);
        assert!(warned(&set, "rsi_14"));
        assert_eq!(set.bollinger, None);
        assert_eq!(set.momentum, None);
        assert_eq!(set.sma20, None);
        assert_eq!(set.volume_ratio, None);
        assert_eq!(set.macd.histogram, 0.0);
    }

    #[test]
    fn warning_reports_requirement_and_availability() {
        let set = IndicatorSet::compute(&series(&[10.0; 12]), &IndicatorConfig::default());
        let found = set.warnings.iter().find(|w| match w {
            DataWarning::InsufficientData { indicator, .. } => indicator == "sma_20",
        });
        assert_eq!(found, Some(&DataWarning::insufficient("sma_20", 20, 12)));
    }
}
