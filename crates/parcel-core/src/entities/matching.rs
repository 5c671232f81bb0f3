use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Grade, InvestmentPurpose, MatchTier, RiskTolerance};
use crate::errors::EngineError;

/// Buyer profile used to rank analysed parcels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InvestorProfile {
    pub name: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub purpose: InvestmentPurpose,
    pub risk_tolerance: RiskTolerance,
}

impl InvestorProfile {
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for a negative or inverted budget.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.budget_min.is_finite() || self.budget_min < 0.0 {
            return Err(EngineError::invalid("budget_min", "must be a non-negative number"));
        }
        if !self.budget_max.is_finite() || self.budget_max < self.budget_min {
            return Err(EngineError::invalid(
                "budget_max",
                format!("must be at least budget_min ({})", self.budget_min),
            ));
        }
        Ok(())
    }
}

/// How well one analysed parcel fits an investor profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MatchResult {
    pub parcel_id: String,
    pub score: f64,
    pub tier: MatchTier,
    pub reasons: Vec<String>,
    pub estimated_price: f64,
    pub grade: Grade,
}
