//! Reasoning text: pure mapping from fused contributions to sentences.
//!
//! Nothing numeric is decided here. The resolver hands over the finished
//! `FusedScore` and snapshot; this module only phrases them.

use crate::config::AnalysisConfig;
use crate::error::DataWarning;
use crate::fusion::{Contribution, FusedScore, IndicatorKind};
use crate::indicators::IndicatorSet;

/// One line per active contribution, heaviest weight first (ties keep the
/// canonical indicator order), then one line per data warning.
pub fn explain(
    fused: &FusedScore,
    indicators: &IndicatorSet,
    price: f64,
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut active: Vec<&Contribution> =
        fused.contributions.iter().filter(|c| c.is_active()).collect();
    // Stable sort: equal weights stay in IndicatorKind::ALL order.
    active.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let mut lines: Vec<String> = active
        .into_iter()
        .map(|c| contribution_line(c, indicators, price, config))
        .collect();

    if lines.is_empty() {
        lines.push("No indicator shows a directional bias".to_string());
    }
    lines.extend(indicators.warnings.iter().map(warning_line));
    lines
}

/// The sentence for a single contribution.
pub fn contribution_line(
    contribution: &Contribution,
    indicators: &IndicatorSet,
    price: f64,
    config: &AnalysisConfig,
) -> String {
    let bullish = contribution.direction > 0.0;
    let full = contribution.direction.abs() >= 1.0;

    match contribution.kind {
        IndicatorKind::Rsi => {
            let rsi = indicators.rsi;
            match (bullish, full) {
                (true, true) => format!("RSI at {rsi:.1} indicates oversold conditions"),
                (false, true) => format!("RSI at {rsi:.1} indicates overbought conditions"),
                (true, false) => format!("RSI at {rsi:.1} leans toward oversold territory"),
                (false, false) => format!("RSI at {rsi:.1} leans toward overbought territory"),
            }
        }
        IndicatorKind::Macd => {
            let hist = indicators.macd.histogram;
            let tone = if bullish { "bullish" } else { "bearish" };
            if full {
                format!("MACD histogram at {hist:.2} signals {tone} momentum")
            } else {
                let line = if indicators.macd.line > 0.0 {
                    "positive"
                } else {
                    "negative"
                };
                format!(
                    "MACD histogram at {hist:.2} turns {tone} against a {line} MACD line, a weak {tone} signal"
                )
            }
        }
        IndicatorKind::Trend => {
            let ind = &config.indicators;
            let sma = indicators.sma20.unwrap_or(f64::NAN);
            let ema = indicators.ema50.unwrap_or(f64::NAN);
            let (side, trend) = if bullish {
                ("above", "an uptrend")
            } else {
                ("below", "a downtrend")
            };
            format!(
                "Price {price:.2} is {side} SMA{} ({sma:.2}) and EMA{} ({ema:.2}), confirming {trend}",
                ind.sma_short, ind.ema_trend
            )
        }
        IndicatorKind::Bollinger => match indicators.bollinger {
            Some(bands) => match (bullish, full) {
                (true, true) => format!(
                    "Price at or below the lower Bollinger Band ({:.2}) suggests oversold conditions",
                    bands.lower
                ),
                (false, true) => format!(
                    "Price at or above the upper Bollinger Band ({:.2}) suggests overbought conditions",
                    bands.upper
                ),
                (true, false) => format!(
                    "Price sits in the lower half of the Bollinger Bands ({:.2} to {:.2}), leaning bullish",
                    bands.lower, bands.upper
                ),
                (false, false) => format!(
                    "Price sits in the upper half of the Bollinger Bands ({:.2} to {:.2}), leaning bearish",
                    bands.lower, bands.upper
                ),
            },
            None => "Bollinger Bands unavailable".to_string(),
        },
        IndicatorKind::Momentum => {
            let tone = if bullish { "bullish" } else { "bearish" };
            let mut evidence = Vec::new();
            if let Some(momentum) = indicators
                .momentum
                .filter(|m| *m != 0.0 && (*m > 0.0) == bullish)
            {
                evidence.push(format!(
                    "{}-day momentum of {momentum:+.1}%",
                    config.indicators.momentum_period
                ));
            }
            if let Some(ratio) = indicators.volume_ratio.filter(|r| *r > 1.0) {
                evidence.push(format!("volume at {ratio:.1}x its average"));
            }
            if evidence.is_empty() {
                evidence.push("recent activity".to_string());
            }
            format!("{} confirms the {tone} bias", capitalize(&evidence.join(" and ")))
        }
    }
}

pub fn warning_line(warning: &DataWarning) -> String {
    format!("Limited history: {warning}")
}

/// The reasoning for a series too short to analyze at all.
pub fn insufficient_history_line(available: usize, required: usize) -> String {
    format!(
        "Insufficient data: {available} price points available, at least {required} required for a reliable analysis"
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
