use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    MarketTrend, PriceEstimate, RegulatoryResult, RiskProfile, RoiScenario, ScoreResult,
};
use crate::enums::{Eligibility, Grade, RiskTier, ScoreFactor, Verdict};
use crate::errors::EngineError;

/// Tolerance when comparing the composite against its recomputed sum.
const SCORE_EPSILON: f64 = 1e-6;

/// Unsealed component outputs, assembled by the report synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReportParts {
    pub parcel_id: String,
    pub generated_at: DateTime<Utc>,
    pub regulatory: RegulatoryResult,
    pub score: ScoreResult,
    pub price: PriceEstimate,
    pub risk: RiskProfile,
    pub scenarios: Vec<RoiScenario>,
    #[serde(default)]
    pub market_trend: Option<MarketTrend>,
}

impl ReportParts {
    /// Check every cross-field invariant and produce the immutable report.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InconsistentReport` describing the first
    /// violated invariant. This always points at a defect in a component.
    pub fn seal(self) -> Result<FeasibilityReport, EngineError> {
        self.check().map_err(|reason| EngineError::InconsistentReport { reason })?;
        let verdict = Verdict::assess(self.score.grade, self.risk.tier);
        Ok(FeasibilityReport {
            parcel_id: self.parcel_id,
            generated_at: self.generated_at,
            regulatory: self.regulatory,
            score: self.score,
            price: self.price,
            risk: self.risk,
            scenarios: self.scenarios,
            market_trend: self.market_trend,
            verdict,
        })
    }

    fn check(&self) -> Result<(), String> {
        self.check_regulatory()?;
        self.check_score()?;
        self.check_price()?;
        self.check_risk()?;
        self.check_scenarios()
    }

    fn check_regulatory(&self) -> Result<(), String> {
        let reg = &self.regulatory;
        let nothing_buildable = reg.allowed_uses.is_empty() || reg.max_build_ratio <= 0.0;
        if nothing_buildable && reg.eligibility != Eligibility::Ineligible {
            return Err(format!(
                "eligibility is {} but no use or build ratio remains",
                reg.eligibility
            ));
        }
        if !nothing_buildable
            && reg.eligibility == Eligibility::Eligible
            && !reg.binding_constraints.is_empty()
        {
            return Err("eligible parcel carries binding overlay constraints".into());
        }
        Ok(())
    }

    fn check_score(&self) -> Result<(), String> {
        let score = &self.score;
        if !score.composite.is_finite() || !(0.0..=100.0).contains(&score.composite) {
            return Err(format!("composite score {} outside [0, 100]", score.composite));
        }
        let expected = Grade::from_score(score.composite);
        if score.grade != expected {
            return Err(format!(
                "grade {} does not match composite {} (expected {expected})",
                score.grade, score.composite
            ));
        }
        for factor in ScoreFactor::ALL {
            if !score.contributions.contains_key(&factor) {
                return Err(format!("score breakdown is missing factor '{factor}'"));
            }
        }
        let sum: f64 = score.contributions.values().sum();
        if (sum.clamp(0.0, 100.0) - score.composite).abs() > SCORE_EPSILON {
            return Err(format!(
                "composite {} does not equal the sum of contributions {sum}",
                score.composite
            ));
        }
        Ok(())
    }

    fn check_price(&self) -> Result<(), String> {
        let price = &self.price;
        if !price.method.admits(price.confidence) {
            return Err(format!(
                "{} estimate reported {} confidence",
                price.method, price.confidence
            ));
        }
        if !price.point.is_finite() || price.point < 0.0 {
            return Err(format!("price point {} is not a valid amount", price.point));
        }
        if !price.interval.contains(price.point) {
            return Err(format!(
                "price point {} lies outside its interval [{}, {}]",
                price.point, price.interval.low, price.interval.high
            ));
        }
        Ok(())
    }

    fn check_risk(&self) -> Result<(), String> {
        let risk = &self.risk;
        for (name, value) in [
            ("legal", risk.legal),
            ("market", risk.market),
            ("development", risk.development),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!("{name} risk {value} outside [0, 100]"));
            }
        }
        if self.regulatory.eligibility == Eligibility::Ineligible && risk.tier < RiskTier::High {
            return Err(format!("ineligible parcel rated {} risk", risk.tier));
        }
        Ok(())
    }

    fn check_scenarios(&self) -> Result<(), String> {
        if self.scenarios.is_empty() {
            return Ok(());
        }
        if self.regulatory.eligibility == Eligibility::Ineligible {
            return Err("ROI scenarios produced for an ineligible parcel".into());
        }
        if self.risk.tier == RiskTier::Critical {
            return Err("ROI scenarios produced for a critical-risk parcel".into());
        }
        if !self
            .scenarios
            .windows(2)
            .all(|pair| pair[0].scenario < pair[1].scenario)
        {
            return Err("ROI scenarios are not in conservative/base/optimistic order".into());
        }
        Ok(())
    }
}

/// The immutable feasibility report handed to callers.
///
/// Only obtainable through [`ReportParts::seal`]; deserializing a stored
/// report re-runs the same checks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(try_from = "ReportParts")]
pub struct FeasibilityReport {
    parcel_id: String,
    generated_at: DateTime<Utc>,
    regulatory: RegulatoryResult,
    score: ScoreResult,
    price: PriceEstimate,
    risk: RiskProfile,
    scenarios: Vec<RoiScenario>,
    market_trend: Option<MarketTrend>,
    verdict: Verdict,
}

impl TryFrom<ReportParts> for FeasibilityReport {
    type Error = EngineError;

    fn try_from(parts: ReportParts) -> Result<Self, Self::Error> {
        parts.seal()
    }
}

impl FeasibilityReport {
    #[must_use]
    pub fn parcel_id(&self) -> &str {
        &self.parcel_id
    }

    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub const fn regulatory(&self) -> &RegulatoryResult {
        &self.regulatory
    }

    #[must_use]
    pub const fn score(&self) -> &ScoreResult {
        &self.score
    }

    #[must_use]
    pub const fn price(&self) -> &PriceEstimate {
        &self.price
    }

    #[must_use]
    pub const fn risk(&self) -> &RiskProfile {
        &self.risk
    }

    /// Empty when simulation was withheld (ineligible or critical risk),
    /// which is not the same as a zero return.
    #[must_use]
    pub fn scenarios(&self) -> &[RoiScenario] {
        &self.scenarios
    }

    #[must_use]
    pub const fn market_trend(&self) -> Option<&MarketTrend> {
        self.market_trend.as_ref()
    }

    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn simulation_withheld(&self) -> bool {
        self.scenarios.is_empty()
    }
}
