//! Recommendation resolver: thresholds the fused score into BUY/HOLD/SELL
//! and derives confidence, target price, risk level and time horizon.
//!
//! Every function here is a pure function of its arguments and the
//! `ResolverConfig`; the engine calls `resolve` once per analysis.

use crate::config::{AnalysisConfig, ResolverConfig};
use crate::domain::{Recommendation, RiskLevel, Signal, TimeHorizon};
use crate::fusion::{FusedScore, IndicatorKind};
use crate::indicators::IndicatorSet;
use crate::reasoning;

/// BUY at or above the buy threshold, SELL at or below the sell threshold.
pub fn resolve_signal(score: f64, config: &ResolverConfig) -> Signal {
    if score >= config.buy_threshold {
        Signal::Buy
    } else if score <= config.sell_threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Confidence in [0, 100].
///
/// BUY/SELL scale linearly from the floor at the threshold to the ceiling
/// at |score| = 100. HOLD starts at `hold_confidence_max` for a score of 0
/// and falls to `hold_confidence_min` at the threshold, so it always stays
/// below the directional floor.
pub fn confidence(signal: Signal, score: f64, config: &ResolverConfig) -> f64 {
    let magnitude = score.abs().min(100.0);
    let value = match signal {
        Signal::Buy | Signal::Sell => {
            let threshold = match signal {
                Signal::Buy => config.buy_threshold,
                _ => config.sell_threshold.abs(),
            };
            let progress = ((magnitude - threshold) / (100.0 - threshold)).clamp(0.0, 1.0);
            config.confidence_floor
                + progress * (config.confidence_ceiling - config.confidence_floor)
        }
        Signal::Hold => {
            let threshold = if score >= 0.0 {
                config.buy_threshold
            } else {
                config.sell_threshold.abs()
            };
            let progress = (magnitude / threshold).clamp(0.0, 1.0);
            config.hold_confidence_max
                - progress * (config.hold_confidence_max - config.hold_confidence_min)
        }
    };
    value.clamp(0.0, 100.0)
}

pub fn target_price(signal: Signal, price: f64, config: &ResolverConfig) -> f64 {
    match signal {
        Signal::Buy => price * (1.0 + config.target_premium_up),
        Signal::Sell => price * (1.0 - config.target_premium_down),
        Signal::Hold => price,
    }
}

/// High when either volatility reading is above its high mark. Low when at
/// least one reading exists and every existing reading is below its low
/// mark. Medium otherwise.
pub fn risk_level(indicators: &IndicatorSet, config: &ResolverConfig) -> RiskLevel {
    let bandwidth = indicators.bollinger.map(|bands| bands.width_pct());
    let momentum = indicators.momentum.map(f64::abs);

    if bandwidth.is_some_and(|w| w > config.high_risk_bandwidth)
        || momentum.is_some_and(|m| m > config.high_risk_momentum)
    {
        return RiskLevel::High;
    }

    let calm: Vec<bool> = [
        bandwidth.map(|w| w < config.low_risk_bandwidth),
        momentum.map(|m| m < config.low_risk_momentum),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !calm.is_empty() && calm.iter().all(|&low| low) {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}

/// Short when RSI and Bollinger carry the decision, Long when the moving
/// average trend does, Medium when mixed or when nothing contributed.
pub fn time_horizon(fused: &FusedScore, config: &ResolverConfig) -> TimeHorizon {
    let total = fused.absolute_total();
    if total <= 0.0 {
        return TimeHorizon::Medium;
    }
    let short = (fused.points(IndicatorKind::Rsi).abs()
        + fused.points(IndicatorKind::Bollinger).abs())
        / total;
    let long = fused.points(IndicatorKind::Trend).abs() / total;

    if short >= config.horizon_dominance {
        TimeHorizon::Short
    } else if long >= config.horizon_dominance {
        TimeHorizon::Long
    } else {
        TimeHorizon::Medium
    }
}

/// Build the recommendation for a fully analyzed series.
pub fn resolve(
    symbol: &str,
    price: f64,
    indicators: IndicatorSet,
    fused: &FusedScore,
    config: &AnalysisConfig,
) -> Recommendation {
    let res = &config.resolver;
    let signal = resolve_signal(fused.score, res);
    let reasoning = reasoning::explain(fused, &indicators, price, config);

    Recommendation {
        symbol: symbol.to_string(),
        signal,
        confidence: confidence(signal, fused.score, res),
        score: fused.score,
        current_price: price,
        target_price: target_price(signal, price, res),
        risk_level: risk_level(&indicators, res),
        time_horizon: time_horizon(fused, res),
        indicators,
        reasoning,
    }
}

/// HOLD at the fixed low confidence for a series shorter than
/// `AnalysisConfig::min_history`. Risk and horizon stay at Medium since
/// there is nothing reliable to derive them from.
pub fn insufficient_data(
    symbol: &str,
    price: f64,
    available: usize,
    indicators: IndicatorSet,
    config: &AnalysisConfig,
) -> Recommendation {
    let mut reasoning = vec![reasoning::insufficient_history_line(
        available,
        config.min_history(),
    )];
    reasoning.extend(indicators.warnings.iter().map(reasoning::warning_line));

    Recommendation {
        symbol: symbol.to_string(),
        signal: Signal::Hold,
        confidence: config.resolver.insufficient_data_confidence,
        score: 0.0,
        current_price: price,
        target_price: price,
        indicators,
        reasoning,
        risk_level: RiskLevel::Medium,
        time_horizon: TimeHorizon::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::Contribution;
    use crate::indicators::{assert_approx, BollingerBands, MacdValues, DEFAULT_EPSILON};

    fn empty_set() -> IndicatorSet {
        IndicatorSet {
            rsi: 50.0,
            macd: MacdValues {
                line: 0.0,
                signal: 0.0,
                histogram: 0.0,
            },
            sma20: None,
            sma50: None,
            sma200: None,
            ema50: None,
            bollinger: None,
            momentum: None,
            volume_ratio: None,
            warnings: Vec::new(),
        }
    }

    fn fused_from(points: [f64; 5]) -> FusedScore {
        let weights = [0.25, 0.25, 0.20, 0.20, 0.10];
        let contributions: Vec<Contribution> = IndicatorKind::ALL
            .iter()
            .zip(weights.iter().zip(points))
            .map(|(&kind, (&w, p))| Contribution::new(kind, w, p / (w * 100.0)))
            .collect();
        FusedScore {
            score: contributions.iter().map(|c| c.points).sum(),
            contributions,
        }
    }

    #[test]
    fn score_just_above_threshold_buys() {
        let config = ResolverConfig::default();
        assert_eq!(resolve_signal(41.0, &config), Signal::Buy);
        let c = confidence(Signal::Buy, 41.0, &config);
        assert!(c >= 70.0);
        assert_approx(c, 70.0 + 28.0 / 60.0, 1e-9);
    }

    #[test]
    fn zero_score_holds_at_max_hold_confidence() {
        let config = ResolverConfig::default();
        assert_eq!(resolve_signal(0.0, &config), Signal::Hold);
        assert_eq!(confidence(Signal::Hold, 0.0, &config), 65.0);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let config = ResolverConfig::default();
        assert_eq!(resolve_signal(40.0, &config), Signal::Buy);
        assert_eq!(resolve_signal(-40.0, &config), Signal::Sell);
        assert_eq!(resolve_signal(39.999, &config), Signal::Hold);
        assert_eq!(confidence(Signal::Sell, -40.0, &config), 70.0);
        assert_eq!(confidence(Signal::Sell, -100.0, &config), 98.0);
    }

    #[test]
    fn directional_confidence_is_monotonic() {
        let config = ResolverConfig::default();
        let mut previous = 0.0;
        for s in 40..=100 {
            let c = confidence(Signal::Buy, s as f64, &config);
            assert!(c >= previous);
            previous = c;
        }
    }

    #[test]
    fn hold_confidence_never_reaches_directional_floor() {
        let config = ResolverConfig::default();
        for s in -39..=39 {
            let c = confidence(Signal::Hold, s as f64, &config);
            assert!((45.0..=65.0).contains(&c), "score {s} gave {c}");
        }
    }

    #[test]
    fn target_moves_with_signal() {
        let config = ResolverConfig::default();
        assert_approx(target_price(Signal::Buy, 70.0, &config), 77.0, 1e-9);
        assert_approx(target_price(Signal::Sell, 100.0, &config), 90.0, 1e-9);
        assert_eq!(target_price(Signal::Hold, 100.0, &config), 100.0);
    }

    #[test]
    fn risk_levels() {
        let config = ResolverConfig::default();
        let mut set = empty_set();
        assert_eq!(risk_level(&set, &config), RiskLevel::Medium);

        set.bollinger = Some(BollingerBands {
            upper: 102.0,
            middle: 100.0,
            lower: 98.0,
        });
        set.momentum = Some(-1.0);
        assert_eq!(risk_level(&set, &config), RiskLevel::Low);

        set.momentum = Some(-5.0);
        assert_eq!(risk_level(&set, &config), RiskLevel::Medium);

        set.momentum = Some(-12.0);
        assert_eq!(risk_level(&set, &config), RiskLevel::High);

        set.momentum = None;
        set.bollinger = Some(BollingerBands {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
        });
        assert_eq!(risk_level(&set, &config), RiskLevel::High);
    }

    #[test]
    fn horizon_follows_dominant_group() {
        let config = ResolverConfig::default();
        assert_eq!(
            time_horizon(&fused_from([25.0, 0.0, 0.0, 16.0, 10.0]), &config),
            TimeHorizon::Short
        );
        assert_eq!(
            time_horizon(&fused_from([0.0, 5.0, 20.0, 0.0, 5.0]), &config),
            TimeHorizon::Long
        );
        assert_eq!(
            time_horizon(&fused_from([10.0, 25.0, 20.0, 0.0, 0.0]), &config),
            TimeHorizon::Medium
        );
        assert_eq!(
            time_horizon(&fused_from([0.0; 5]), &config),
            TimeHorizon::Medium
        );
    }

    #[test]
    fn resolve_assembles_recommendation() {
        let config = AnalysisConfig::default();
        let mut set = empty_set();
        set.rsi = 20.0;
        let fused = fused_from([25.0, 25.0, 0.0, 0.0, 0.0]);
        let rec = resolve("ACME", 50.0, set, &fused, &config);

        assert_eq!(rec.signal, Signal::Buy);
        assert_eq!(rec.score, 50.0);
        assert!(rec.target_price > rec.current_price);
        assert_eq!(rec.reasoning.len(), 2);
        assert!(rec.reasoning[0].starts_with("RSI at 20.0"));
        assert_approx(rec.confidence, 70.0 + 10.0 / 60.0 * 28.0, DEFAULT_EPSILON);
    }

    #[test]
    fn insufficient_data_is_a_well_formed_hold() {
        let config = AnalysisConfig::default();
        let rec = insufficient_data("ACME", 12.5, 5, empty_set(), &config);
        assert_eq!(rec.signal, Signal::Hold);
        assert_eq!(rec.confidence, 50.0);
        assert_eq!(rec.target_price, 12.5);
        assert!(rec.reasoning[0].starts_with("Insufficient data"));
    }
}
