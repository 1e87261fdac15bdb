//! SignalForge Core — deterministic technical-analysis engine.
//!
//! Turns a daily price/volume history into a single BUY/HOLD/SELL
//! recommendation:
//! - Domain types (price points, validated series, recommendation)
//! - Indicator calculator (RSI, MACD, SMA, EMA, Bollinger, momentum, volume)
//! - Signal fuser (weighted directional contributions → score in [-100, 100])
//! - Recommendation resolver (signal, confidence, target, risk, horizon)
//! - Reasoning text, kept apart from the numeric core
//!
//! Every call is a pure function of its input series and configuration.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod indicators;
pub mod reasoning;
pub mod resolver;
pub mod synthetic;

pub use config::{AnalysisConfig, ConfigError};
pub use domain::{PricePoint, PriceSeries, Recommendation, RiskLevel, Signal, TimeHorizon};
pub use engine::{analyze, Analyzer};
pub use error::{AnalysisError, DataWarning};
pub use indicators::IndicatorSet;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a caller might hand to another thread
    /// is Send + Sync. Batch callers fan out one analysis per symbol.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<PricePoint>();
        require_sync::<PricePoint>();
        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<Recommendation>();
        require_sync::<Recommendation>();
        require_send::<IndicatorSet>();
        require_sync::<IndicatorSet>();

        // Engine and configuration
        require_send::<Analyzer>();
        require_sync::<Analyzer>();
        require_send::<AnalysisConfig>();
        require_sync::<AnalysisConfig>();

        // Errors
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<ConfigError>();
        require_sync::<ConfigError>();

        // Fusion
        require_send::<fusion::FusedScore>();
        require_sync::<fusion::FusedScore>();

        // Indicator trait objects
        require_send::<Box<dyn indicators::Indicator>>();
        require_sync::<Box<dyn indicators::Indicator>>();
    }

    /// Architecture contract: indicators see price history only.
    ///
    /// `compute` takes `&[PricePoint]` and nothing else, so no indicator can
    /// read configuration thresholds or a previous recommendation.
    #[test]
    fn indicator_trait_takes_only_price_history() {
        fn _check_trait_object_builds(
            indicator: &dyn indicators::Indicator,
            points: &[PricePoint],
        ) -> Vec<f64> {
            indicator.compute(points)
        }
    }

    #[test]
    fn default_analyzer_uses_default_config() {
        assert_eq!(Analyzer::default().config(), &AnalysisConfig::default());
    }
}
