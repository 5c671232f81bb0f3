//! Report synthesizer: assemble component outputs and seal the report.

use chrono::{DateTime, Utc};
use parcel_core::EngineError;
use parcel_core::entities::{
    FeasibilityReport, MarketTrend, PriceEstimate, RegulatoryResult, ReportParts, RiskProfile,
    RoiScenario, ScoreResult,
};

/// Component outputs for one parcel, before sealing.
#[derive(Debug, Clone)]
pub struct Components {
    pub regulatory: RegulatoryResult,
    pub score: ScoreResult,
    pub price: PriceEstimate,
    pub risk: RiskProfile,
    pub scenarios: Vec<RoiScenario>,
    pub market_trend: Option<MarketTrend>,
}

/// Seal the components into an immutable [`FeasibilityReport`].
///
/// # Errors
///
/// `InconsistentReport` when the components disagree with each other. This
/// is never caused by caller input.
pub fn synthesize(
    parcel_id: &str,
    generated_at: DateTime<Utc>,
    components: Components,
) -> Result<FeasibilityReport, EngineError> {
    let parts = ReportParts {
        parcel_id: parcel_id.to_string(),
        generated_at,
        regulatory: components.regulatory,
        score: components.score,
        price: components.price,
        risk: components.risk,
        scenarios: components.scenarios,
        market_trend: components.market_trend,
    };
    parts.seal().inspect_err(|err| {
        tracing::error!(parcel = parcel_id, error = %err, "report failed consistency checks");
    })
}
