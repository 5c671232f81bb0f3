//! Investor matcher: fit of a finished report to an investor profile.

use std::cmp::Ordering;

use parcel_core::EngineError;
use parcel_core::entities::{FeasibilityReport, InvestorProfile, MatchResult};
use parcel_core::enums::{InvestmentPurpose, MatchTier, RiskCategory, UseCategory};
use parcel_core::units;

const BUDGET_IN_RANGE: f64 = 30.0;
const BUDGET_BELOW: f64 = 20.0;
const BUDGET_ABOVE: f64 = 5.0;
const DEVELOPMENT_WEIGHT: f64 = 25.0;
const PURPOSE_FULL: f64 = 25.0;
const RISK_FIT_MAX: f64 = 20.0;
/// Sub-scores at or above this count as severe for risk fit.
const SEVERE_RISK: f64 = 60.0;
/// Composite score a development buyer looks for.
const DEVELOPMENT_READY: f64 = 70.0;

/// Score one report against `profile`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn match_report(report: &FeasibilityReport, profile: &InvestorProfile) -> MatchResult {
    let mut reasons = Vec::new();
    let price = report.price().point;

    let budget = if price < profile.budget_min {
        reasons.push(format!("priced below budget ({price:.0})"));
        BUDGET_BELOW
    } else if price > profile.budget_max {
        reasons.push(format!("priced above budget ({price:.0})"));
        BUDGET_ABOVE
    } else {
        reasons.push("priced within budget".to_string());
        BUDGET_IN_RANGE
    };

    let composite = report.score().composite;
    let development = DEVELOPMENT_WEIGHT * composite / 100.0;
    reasons.push(format!(
        "development grade {} ({composite:.1})",
        report.score().grade
    ));

    let regulatory = report.regulatory();
    let purpose = match profile.purpose {
        InvestmentPurpose::ShortTermGain => {
            if regulatory.permits(UseCategory::Commercial) {
                reasons.push("commercial use permitted".to_string());
                PURPOSE_FULL
            } else {
                10.0
            }
        }
        InvestmentPurpose::LongTermHold => {
            if regulatory.permits(UseCategory::Residential)
                || regulatory.permits(UseCategory::Agricultural)
            {
                reasons.push("suited to long-term holding".to_string());
                PURPOSE_FULL
            } else {
                15.0
            }
        }
        InvestmentPurpose::Development => {
            if composite >= DEVELOPMENT_READY {
                reasons.push("high development potential".to_string());
                PURPOSE_FULL
            } else {
                5.0
            }
        }
    };

    let risk = report.risk();
    let severe = [
        RiskCategory::Legal,
        RiskCategory::Market,
        RiskCategory::Development,
    ]
    .into_iter()
    .filter(|&category| risk.sub_score(category) >= SEVERE_RISK)
    .inspect(|category| reasons.push(format!("severe {category} risk")))
    .count();
    let risk_fit =
        (RISK_FIT_MAX - profile.risk_tolerance.severe_risk_penalty() * severe as f64).max(0.0);

    let score = units::round2(budget + development + purpose + risk_fit);
    MatchResult {
        parcel_id: report.parcel_id().to_string(),
        score,
        tier: MatchTier::from_score(score),
        reasons,
        estimated_price: price,
        grade: report.score().grade,
    }
}

/// Match every report and order best first, ties broken by parcel id.
///
/// # Errors
///
/// `InvalidInput` if the profile's budget range is malformed.
pub fn rank(
    reports: &[FeasibilityReport],
    profile: &InvestorProfile,
) -> Result<Vec<MatchResult>, EngineError> {
    profile.validate()?;
    let mut matches: Vec<MatchResult> = reports
        .iter()
        .map(|report| match_report(report, profile))
        .collect();
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.parcel_id.cmp(&b.parcel_id))
    });
    Ok(matches)
}
