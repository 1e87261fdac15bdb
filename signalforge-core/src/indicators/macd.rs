//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(close, fast) - EMA(close, slow)
//! signal = EMA(line, signal_period), seeded once the line exists
//! histogram = line - signal
//!
//! Three outputs, exposed as separate Indicator instances like Bollinger.
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal/histogram.
//!
//! Degraded reading (see `Macd::latest_reading`):
//! - fewer than `slow + signal` points: signal = line, histogram = 0
//! - fewer than `slow` points: both EMA periods clamp to the history length

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::PricePoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// How much history backed a MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdStatus {
    Full,
    /// Line is real, signal line fell back to the line itself.
    SignalFallback,
    /// Not even `slow` points; EMA periods were clamped to the history length.
    Clamped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub values: MacdValues,
    pub status: MacdStatus,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Line)
    }

    pub fn signal_line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Signal)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Histogram)
    }

    fn with_output(fast: usize, slow: usize, signal: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(slow > fast, "MACD slow period must be > fast period");
        let label = match output {
            MacdOutput::Line => "line",
            MacdOutput::Signal => "signal",
            MacdOutput::Histogram => "histogram",
        };
        Self {
            fast,
            slow,
            signal,
            output,
            name: format!("macd_{label}_{fast}_{slow}_{signal}"),
        }
    }

    /// Line, signal and histogram at the last point, with the degraded
    /// fallbacks applied for short histories.
    pub fn latest_reading(
        points: &[PricePoint],
        fast: usize,
        slow: usize,
        signal: usize,
    ) -> MacdReading {
        let n = points.len();
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();

        if n >= slow + signal {
            let (line, signal_line) = macd_series(&closes, fast, slow, signal);
            let (l, s) = (line[n - 1], signal_line[n - 1]);
            return MacdReading {
                values: MacdValues {
                    line: l,
                    signal: s,
                    histogram: l - s,
                },
                status: MacdStatus::Full,
            };
        }

        let (fast, slow, status) = if n >= slow {
            (fast, slow, MacdStatus::SignalFallback)
        } else {
            (fast.min(n), slow.min(n), MacdStatus::Clamped)
        };
        let line = match n {
            0 => 0.0,
            _ => ema_of_series(&closes, fast)[n - 1] - ema_of_series(&closes, slow)[n - 1],
        };
        MacdReading {
            values: MacdValues {
                line,
                signal: line,
                histogram: 0.0,
            },
            status,
        }
    }
}

/// Full line and signal series. Signal is NaN until `slow + signal - 1` points exist.
fn macd_series(closes: &[f64], fast: usize, slow: usize, signal: usize) -> (Vec<f64>, Vec<f64>) {
    let n = closes.len();
    let fast_ema = ema_of_series(closes, fast);
    let slow_ema = ema_of_series(closes, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();

    let mut signal_line = vec![f64::NAN; n];
    if slow >= 1 && n >= slow {
        let start = slow - 1;
        let smoothed = ema_of_series(&line[start..], signal);
        signal_line[start..].copy_from_slice(&smoothed);
    }
    (line, signal_line)
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => self.slow - 1,
            MacdOutput::Signal | MacdOutput::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        let (line, signal_line) = macd_series(&closes, self.fast, self.slow, self.signal);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => signal_line,
            MacdOutput::Histogram => line
                .iter()
                .zip(&signal_line)
                .map(|(l, s)| l - s)
                .collect(),
        }
    }
}
