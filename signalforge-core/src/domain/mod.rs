//! Domain types for SignalForge

pub mod price;
pub mod recommendation;

pub use price::{PricePoint, PriceSeries};
pub use recommendation::{Recommendation, RiskLevel, Signal, TimeHorizon};
