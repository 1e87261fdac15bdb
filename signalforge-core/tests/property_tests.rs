//! Property tests for analysis invariants.
//!
//! Uses proptest to verify, over arbitrary random walks:
//! 1. Confidence bounds — always within [0, 100]
//! 2. Score bounds — always within [-100, 100]
//! 3. Signal consistency — the signal is a pure function of the score
//! 4. Target direction — target moves with the signal
//! 5. Determinism — identical input gives an identical fingerprint
//! 6. Indicator bounds — RSI within [0, 100], contributions within weights

use chrono::NaiveDate;
use proptest::prelude::*;
use signalforge_core::fusion::fuse;
use signalforge_core::resolver::resolve_signal;
use signalforge_core::synthetic::RandomWalk;
use signalforge_core::{analyze, AnalysisConfig, IndicatorSet, PriceSeries, Signal};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_walk() -> impl Strategy<Value = RandomWalk> {
    (
        1usize..300,
        (5.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
        -0.01..0.01_f64,
        0.0..0.08_f64,
    )
        .prop_map(|(days, start_price, drift, volatility)| RandomWalk {
            start: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            start_price,
            days,
            drift,
            volatility,
            base_volume: 1_000_000.0,
        })
}

fn arb_series() -> impl Strategy<Value = PriceSeries> {
    (arb_walk(), any::<u64>()).prop_map(|(walk, seed)| walk.generate(seed).unwrap())
}

// ── 1–4. Recommendation invariants ───────────────────────────────────

proptest! {
    #[test]
    fn recommendation_invariants_hold(series in arb_series()) {
        let config = AnalysisConfig::default();
        let rec = analyze("PROP", &series).unwrap();

        prop_assert!((0.0..=100.0).contains(&rec.confidence));
        prop_assert!((-100.0..=100.0).contains(&rec.score));
        prop_assert_eq!(rec.signal, resolve_signal(rec.score, &config.resolver));
        prop_assert_eq!(rec.current_price, series.latest().close);

        match rec.signal {
            Signal::Buy => {
                prop_assert!(rec.target_price > rec.current_price);
                prop_assert!(rec.confidence >= config.resolver.confidence_floor);
            }
            Signal::Sell => {
                prop_assert!(rec.target_price < rec.current_price);
                prop_assert!(rec.confidence >= config.resolver.confidence_floor);
            }
            Signal::Hold => {
                prop_assert_eq!(rec.target_price, rec.current_price);
                prop_assert!(rec.confidence < config.resolver.confidence_floor);
            }
        }
        prop_assert!(!rec.reasoning.is_empty());
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn analysis_is_deterministic(walk in arb_walk(), seed in any::<u64>()) {
        let first = analyze("PROP", &walk.generate(seed).unwrap()).unwrap();
        let second = analyze("PROP", &walk.generate(seed).unwrap()).unwrap();
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
    }
}

// ── 6. Indicator and fusion bounds ───────────────────────────────────

proptest! {
    #[test]
    fn indicator_and_contribution_bounds(series in arb_series()) {
        let config = AnalysisConfig::default();
        let set = IndicatorSet::compute(&series, &config.indicators);
        prop_assert!((0.0..=100.0).contains(&set.rsi));
        prop_assert!(set.macd.histogram.is_finite());

        let fused = fuse(&set, series.latest().close, &config.fusion);
        for c in &fused.contributions {
            prop_assert!((-1.0..=1.0).contains(&c.direction));
            prop_assert!(c.points.abs() <= c.weight * 100.0 + 1e-9);
        }
        prop_assert!((-100.0..=100.0).contains(&fused.score));
    }

    /// The tie-breaker never points against the primaries.
    #[test]
    fn tie_breaker_never_opposes(series in arb_series()) {
        let config = AnalysisConfig::default();
        let set = IndicatorSet::compute(&series, &config.indicators);
        let fused = fuse(&set, series.latest().close, &config.fusion);

        let primary: f64 = fused
            .contributions
            .iter()
            .filter(|c| c.kind.is_primary())
            .map(|c| c.points)
            .sum();
        let tie = fused
            .contributions
            .iter()
            .find(|c| !c.kind.is_primary())
            .map_or(0.0, |c| c.points);
        prop_assert!(tie * primary >= 0.0);
    }

    /// Short histories never error and always hold.
    #[test]
    fn short_history_always_holds(walk in arb_walk(), seed in any::<u64>()) {
        let walk = RandomWalk { days: walk.days % 14 + 1, ..walk };
        let rec = analyze("PROP", &walk.generate(seed).unwrap()).unwrap();
        prop_assert_eq!(rec.signal, Signal::Hold);
        prop_assert_eq!(rec.confidence, 50.0);
    }
}
