//! ROI simulator: holding-period scenarios over the estimated price.

use parcel_core::EngineError;
use parcel_core::entities::{
    PriceEstimate, RegulatoryResult, RiskProfile, RoiAssumptions, RoiScenario,
};
use parcel_core::enums::{Eligibility, RiskTier};

/// Simulation is withheld for ineligible or critical-risk parcels.
#[must_use]
pub fn should_simulate(regulatory: &RegulatoryResult, risk: &RiskProfile) -> bool {
    regulatory.eligibility != Eligibility::Ineligible && risk.tier != RiskTier::Critical
}

/// Project every configured scenario, ordered Conservative → Optimistic.
///
/// # Errors
///
/// `InvalidInput` if the assumptions fail validation or the cost basis
/// (explicit or defaulted to the point estimate) is not positive.
pub fn simulate(
    price: &PriceEstimate,
    assumptions: &RoiAssumptions,
) -> Result<Vec<RoiScenario>, EngineError> {
    assumptions.validate()?;
    let basis = assumptions.acquisition_cost.unwrap_or(price.point);
    if !basis.is_finite() || basis <= 0.0 {
        return Err(EngineError::InvalidInput {
            field: "acquisition_cost".into(),
            reason: format!("cost basis must be positive, got {basis}"),
        });
    }

    let years = assumptions.holding_period_years;
    let years_f = f64::from(years);
    let exponent = i32::try_from(years).map_err(|_| EngineError::InvalidInput {
        field: "holding_period_years".into(),
        reason: format!("{years} years is out of range"),
    })?;

    let mut plans = assumptions.scenarios.clone();
    plans.sort_by_key(|plan| plan.scenario);

    let scenarios = plans
        .iter()
        .map(|plan| {
            let sale_value = price.point * (1.0 + plan.appreciation_rate).powi(exponent);
            let upfront = basis * assumptions.transaction_cost_rate * plan.cost_multiplier;
            let yearly_holding =
                basis * assumptions.annual_holding_cost_rate * plan.cost_multiplier;
            let costs = upfront + yearly_holding * years_f;

            let gain = sale_value - basis;
            let tax = gain.max(0.0) * assumptions.capital_gains_tax_rate;
            let net_return = gain - costs - tax;
            let total_return = net_return / basis;
            let annualized_return = if total_return <= -1.0 {
                -1.0
            } else {
                (1.0 + total_return).powf(1.0 / years_f) - 1.0
            };

            let yearly_gain = price.point * plan.appreciation_rate - yearly_holding;
            let break_even_years = (yearly_gain > 0.0).then(|| upfront / yearly_gain);

            RoiScenario {
                scenario: plan.scenario,
                holding_period_years: years,
                sale_value,
                net_return,
                total_return,
                annualized_return,
                break_even_years,
            }
        })
        .collect();
    Ok(scenarios)
}
