use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceLevel, EstimationMethod};

/// Inclusive price range around a point estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PriceInterval {
    pub low: f64,
    pub high: f64,
}

impl PriceInterval {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// An input that moved the estimate, with its signed effect in currency.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PriceFactor {
    pub name: String,
    pub effect: f64,
}

/// Market value estimate for a whole parcel.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PriceEstimate {
    pub point: f64,
    pub interval: PriceInterval,
    pub price_per_m2: f64,
    pub confidence: ConfidenceLevel,
    /// Which estimation path ran. Callers rely on this to weigh the estimate.
    pub method: EstimationMethod,
    /// Number of comparable sales the estimate drew on.
    pub sample_size: usize,
    /// Ordered by descending absolute effect.
    pub factors: Vec<PriceFactor>,
}
