//! Error and warning types for the analysis pipeline.
//!
//! Two tiers:
//! - `AnalysisError`: the call is rejected, no recommendation is produced.
//! - `DataWarning`: an indicator ran on a shorter history than it wants and
//!   fell back to its documented degraded value. Carried in the indicator
//!   snapshot and echoed in the reasoning text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal input (or, in theory, computation) errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("price series is empty")]
    EmptySeries,

    #[error("non-finite {field} at {date}")]
    NonFiniteValue { date: NaiveDate, field: &'static str },

    #[error("non-positive {field} ({value}) at {date}")]
    NonPositivePrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("negative volume ({volume}) at {date}")]
    NegativeVolume { date: NaiveDate, volume: f64 },

    #[error("high {high} is below low {low} at {date}")]
    InvalidRange { date: NaiveDate, high: f64, low: f64 },

    #[error("dates out of order: {current} follows {previous}")]
    UnorderedDates {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("duplicate date {0}")]
    DuplicateDate(NaiveDate),

    #[error("computation produced a non-finite {0}")]
    Computation(&'static str),
}

impl AnalysisError {
    /// True for every variant caused by the caller's input.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Computation(_))
    }
}

/// Non-fatal notice that an indicator was degraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },
}

impl DataWarning {
    pub fn insufficient(indicator: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            indicator: indicator.into(),
            required,
            available,
        }
    }
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData {
                indicator,
                required,
                available,
            } => write!(
                f,
                "insufficient data for {indicator}: {required} points required, {available} available"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computation_is_not_malformed_input() {
        assert!(!AnalysisError::Computation("score").is_malformed_input());
        assert!(AnalysisError::EmptySeries.is_malformed_input());
    }

    #[test]
    fn warning_display() {
        let w = DataWarning::insufficient("sma_50", 50, 30);
        assert_eq!(
            w.to_string(),
            "insufficient data for sma_50: 50 points required, 30 available"
        );
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let w = DataWarning::insufficient("rsi_14", 15, 5);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"kind\":\"insufficient_data\""));
        let back: DataWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
