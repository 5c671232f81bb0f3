use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{RiskCategory, RiskTier};

/// One reason a risk sub-score was raised.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub description: String,
    pub points: f64,
}

/// Independent risk sub-scores (0–100, higher is riskier) and the overall tier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RiskProfile {
    pub legal: f64,
    pub market: f64,
    pub development: f64,
    /// Weighted average of the three sub-scores used for banding.
    pub weighted: f64,
    pub tier: RiskTier,
    pub factors: Vec<RiskFactor>,
}

impl RiskProfile {
    #[must_use]
    pub const fn sub_score(&self, category: RiskCategory) -> f64 {
        match category {
            RiskCategory::Legal => self.legal,
            RiskCategory::Market => self.market,
            RiskCategory::Development => self.development,
        }
    }

    /// The highest of the three sub-scores.
    #[must_use]
    pub fn worst(&self) -> f64 {
        self.legal.max(self.market).max(self.development)
    }
}
