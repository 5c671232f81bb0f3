//! Risk analyzer: legal, market and development sub-scores and the overall tier.
//!
//! Sub-scores run 0–100, higher is riskier. Every point added is recorded as
//! a [`RiskFactor`] so the profile explains itself.

use parcel_config::RiskConfig;
use parcel_core::entities::{
    MarketTrend, ParcelRecord, PriceEstimate, RegulatoryResult, RiskFactor, RiskProfile,
};
use parcel_core::enums::{ConfidenceLevel, Eligibility, RiskCategory, RiskTier, TrendDirection};

const BINDING_CONSTRAINT_POINTS: f64 = 10.0;
const NO_ROAD_ACCESS_POINTS: f64 = 15.0;
const VOLATILITY_CAP: f64 = 30.0;
const DOWNTREND_POINTS: f64 = 10.0;
const IRREGULAR_SHAPE_POINTS: f64 = 25.0;

/// Market inputs to the risk analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketSignals<'a> {
    /// Coefficient of variation of recent district prices.
    pub volatility: Option<f64>,
    pub trend: Option<&'a MarketTrend>,
}

#[must_use]
pub fn assess(
    parcel: &ParcelRecord,
    regulatory: &RegulatoryResult,
    price: &PriceEstimate,
    market: MarketSignals<'_>,
    config: &RiskConfig,
) -> RiskProfile {
    let mut factors = Vec::new();
    let legal = legal_risk(parcel, regulatory, &mut factors);
    let market_score = market_risk(price, market, &mut factors);
    let development = development_risk(parcel, &mut factors);

    let w = &config.weights;
    let weighted = w.legal * legal + w.market * market_score + w.development * development;

    let mut tier = if [legal, market_score, development]
        .iter()
        .any(|&score| score > config.critical_ceiling)
    {
        RiskTier::Critical
    } else {
        config.band(weighted)
    };
    if regulatory.eligibility == Eligibility::Ineligible && tier < RiskTier::High {
        tier = RiskTier::High;
    }

    tracing::debug!(
        parcel = %parcel.id,
        legal,
        market = market_score,
        development,
        %tier,
        "risk assessed"
    );

    RiskProfile {
        legal,
        market: market_score,
        development,
        weighted,
        tier,
        factors,
    }
}

fn push(factors: &mut Vec<RiskFactor>, category: RiskCategory, description: String, points: f64) {
    if points > 0.0 {
        factors.push(RiskFactor {
            category,
            description,
            points,
        });
    }
}

#[allow(clippy::cast_precision_loss)]
fn legal_risk(
    parcel: &ParcelRecord,
    regulatory: &RegulatoryResult,
    factors: &mut Vec<RiskFactor>,
) -> f64 {
    let base = match regulatory.eligibility {
        Eligibility::Eligible => 10.0,
        Eligibility::ConditionallyEligible => 35.0,
        Eligibility::Ineligible => 95.0,
    };
    push(
        factors,
        RiskCategory::Legal,
        format!("eligibility is {}", regulatory.eligibility),
        base,
    );

    let binding = BINDING_CONSTRAINT_POINTS * regulatory.binding_count() as f64;
    for constraint in &regulatory.binding_constraints {
        push(
            factors,
            RiskCategory::Legal,
            format!("binding overlay '{}'", constraint.overlay),
            BINDING_CONSTRAINT_POINTS,
        );
    }

    let access = if parcel.road_access {
        0.0
    } else {
        NO_ROAD_ACCESS_POINTS
    };
    push(factors, RiskCategory::Legal, "no road access".into(), access);

    (base + binding + access).clamp(0.0, 100.0)
}

fn market_risk(
    price: &PriceEstimate,
    market: MarketSignals<'_>,
    factors: &mut Vec<RiskFactor>,
) -> f64 {
    let base = match price.confidence {
        ConfidenceLevel::High => 15.0,
        ConfidenceLevel::Medium => 30.0,
        ConfidenceLevel::Low => 55.0,
    };
    push(
        factors,
        RiskCategory::Market,
        format!("{} confidence {} price estimate", price.confidence, price.method),
        base,
    );

    let volatility = market
        .volatility
        .map_or(0.0, |v| (v * 100.0).clamp(0.0, VOLATILITY_CAP));
    push(
        factors,
        RiskCategory::Market,
        format!("price volatility {volatility:.1}%"),
        volatility,
    );

    let downtrend = match market.trend {
        Some(trend) if trend.direction == TrendDirection::Down => DOWNTREND_POINTS,
        _ => 0.0,
    };
    push(
        factors,
        RiskCategory::Market,
        "district prices trending down".into(),
        downtrend,
    );

    (base + volatility + downtrend).clamp(0.0, 100.0)
}

fn development_risk(parcel: &ParcelRecord, factors: &mut Vec<RiskFactor>) -> f64 {
    let terrain = parcel.terrain.risk_points();
    push(
        factors,
        RiskCategory::Development,
        format!("{} terrain", parcel.terrain),
        terrain,
    );
    let shape = (1.0 - parcel.shape_regularity) * IRREGULAR_SHAPE_POINTS;
    push(
        factors,
        RiskCategory::Development,
        format!("shape regularity {:.2}", parcel.shape_regularity),
        shape,
    );
    (terrain + shape).clamp(0.0, 100.0)
}
