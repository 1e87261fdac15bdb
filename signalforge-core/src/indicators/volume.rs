//! Volume ratio — latest volume relative to the trailing average.
//!
//! ratio[t] = volume[t] / mean(volume[t-period..t])
//! Lookback: period. Undefined (NaN) when the trailing average is zero, so a
//! series without volume data never confirms anything.

use super::Indicator;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct VolumeRatio {
    period: usize,
    name: String,
}

impl VolumeRatio {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "VolumeRatio period must be >= 1");
        Self {
            period,
            name: format!("volume_ratio_{period}"),
        }
    }
}

impl Indicator for VolumeRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let n = points.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            let avg = points[i - self.period..i]
                .iter()
                .map(|p| p.volume)
                .sum::<f64>()
                / self.period as f64;
            if avg > 0.0 {
                result[i] = points[i].volume / avg;
            }
        }

        result
    }
}
