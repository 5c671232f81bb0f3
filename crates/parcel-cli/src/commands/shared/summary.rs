use parcel_core::entities::FeasibilityReport;
use parcel_core::enums::{
    ConfidenceLevel, Eligibility, EstimationMethod, Grade, RiskTier, ScenarioKind,
    TrendDirection, Verdict,
};
use serde::Serialize;

/// One-row view of a report for table output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSummary {
    pub parcel_id: String,
    pub eligibility: Eligibility,
    pub score: f64,
    pub grade: Grade,
    pub price: f64,
    pub price_low: f64,
    pub price_high: f64,
    pub method: EstimationMethod,
    pub confidence: ConfidenceLevel,
    pub risk: RiskTier,
    pub weighted_risk: f64,
    /// Base-case net return; absent when simulation was withheld.
    pub base_net_return: Option<f64>,
    pub trend: Option<TrendDirection>,
    pub verdict: Verdict,
}

impl From<&FeasibilityReport> for ReportSummary {
    fn from(report: &FeasibilityReport) -> Self {
        let price = report.price();
        Self {
            parcel_id: report.parcel_id().to_string(),
            eligibility: report.regulatory().eligibility,
            score: report.score().composite,
            grade: report.score().grade,
            price: price.point.round(),
            price_low: price.interval.low.round(),
            price_high: price.interval.high.round(),
            method: price.method,
            confidence: price.confidence,
            risk: report.risk().tier,
            weighted_risk: report.risk().weighted,
            base_net_return: report
                .scenarios()
                .iter()
                .find(|s| s.scenario == ScenarioKind::Base)
                .map(|s| s.net_return.round()),
            trend: report.market_trend().map(|t| t.direction),
            verdict: report.verdict(),
        }
    }
}
