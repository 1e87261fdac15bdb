//! Analysis engine: the calculator → fuser → resolver pipeline.
//!
//! `Analyzer` holds a validated `AnalysisConfig` and nothing else. Each call
//! is an independent pure computation, so one analyzer can be shared across
//! threads and called concurrently.

use crate::config::{AnalysisConfig, ConfigError};
use crate::domain::{PricePoint, PriceSeries, Recommendation};
use crate::error::AnalysisError;
use crate::fusion;
use crate::indicators::IndicatorSet;
use crate::resolver;

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Rejects configurations that fail `AnalysisConfig::validate`.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one symbol.
    ///
    /// 1. Compute the indicator snapshot (degraded indicators leave warnings)
    /// 2. Short series stop here with the insufficient-data HOLD
    /// 3. Fuse the snapshot into a score
    /// 4. Resolve the score into a recommendation
    pub fn analyze(
        &self,
        symbol: &str,
        series: &PriceSeries,
    ) -> Result<Recommendation, AnalysisError> {
        if symbol.trim().is_empty() {
            return Err(AnalysisError::EmptySymbol);
        }
        let _span = tracing::debug_span!("analyze", symbol = %symbol, points = series.len())
            .entered();

        let price = series.latest().close;
        let indicators = IndicatorSet::compute(series, &self.config.indicators);
        for warning in &indicators.warnings {
            tracing::debug!(%warning, "indicator degraded");
        }

        let min_history = self.config.min_history();
        if series.len() < min_history {
            tracing::info!(
                available = series.len(),
                required = min_history,
                "insufficient history, holding"
            );
            return Ok(resolver::insufficient_data(
                symbol,
                price,
                series.len(),
                indicators,
                &self.config,
            ));
        }

        let fused = fusion::fuse(&indicators, price, &self.config.fusion);
        if !fused.score.is_finite() {
            return Err(AnalysisError::Computation("fused score"));
        }
        for c in fused.contributions.iter().filter(|c| c.is_active()) {
            tracing::debug!(kind = c.kind.label(), points = c.points, "contribution");
        }
        tracing::debug!(score = fused.score, "fused score");

        let recommendation = resolver::resolve(symbol, price, indicators, &fused, &self.config);
        tracing::info!(
            signal = %recommendation.signal,
            confidence = recommendation.confidence,
            target = recommendation.target_price,
            "recommendation resolved"
        );
        Ok(recommendation)
    }

    /// Validate raw points into a series, then analyze.
    pub fn analyze_points(
        &self,
        symbol: &str,
        points: Vec<PricePoint>,
    ) -> Result<Recommendation, AnalysisError> {
        if symbol.trim().is_empty() {
            return Err(AnalysisError::EmptySymbol);
        }
        let series = PriceSeries::new(points)?;
        self.analyze(symbol, &series)
    }
}

/// Analyze with the default configuration.
pub fn analyze(symbol: &str, series: &PriceSeries) -> Result<Recommendation, AnalysisError> {
    Analyzer::default().analyze(symbol, series)
}
