use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ScenarioKind;
use crate::errors::EngineError;

/// Appreciation and cost assumptions for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScenarioAssumption {
    pub scenario: ScenarioKind,
    /// Annual appreciation as a fraction (0.03 = 3%/year).
    pub appreciation_rate: f64,
    /// Multiplier applied to transaction and holding costs.
    pub cost_multiplier: f64,
}

const fn default_holding_period() -> u32 {
    5
}

const fn default_transaction_cost_rate() -> f64 {
    0.04
}

const fn default_annual_holding_cost_rate() -> f64 {
    0.003
}

const fn default_capital_gains_tax_rate() -> f64 {
    0.3
}

fn default_scenarios() -> Vec<ScenarioAssumption> {
    vec![
        ScenarioAssumption {
            scenario: ScenarioKind::Conservative,
            appreciation_rate: 0.02,
            cost_multiplier: 1.2,
        },
        ScenarioAssumption {
            scenario: ScenarioKind::Base,
            appreciation_rate: 0.05,
            cost_multiplier: 1.0,
        },
        ScenarioAssumption {
            scenario: ScenarioKind::Optimistic,
            appreciation_rate: 0.10,
            cost_multiplier: 0.9,
        },
    ]
}

/// Caller-supplied return assumptions for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RoiAssumptions {
    /// Total acquisition cost basis. Defaults to the price point estimate.
    #[serde(default)]
    pub acquisition_cost: Option<f64>,
    #[serde(default = "default_holding_period")]
    pub holding_period_years: u32,
    /// One-off acquisition costs as a fraction of the cost basis.
    #[serde(default = "default_transaction_cost_rate")]
    pub transaction_cost_rate: f64,
    /// Recurring yearly holding costs (property tax etc.) as a fraction of the cost basis.
    #[serde(default = "default_annual_holding_cost_rate")]
    pub annual_holding_cost_rate: f64,
    /// Tax on positive capital gains at sale.
    #[serde(default = "default_capital_gains_tax_rate")]
    pub capital_gains_tax_rate: f64,
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioAssumption>,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            acquisition_cost: None,
            holding_period_years: default_holding_period(),
            transaction_cost_rate: default_transaction_cost_rate(),
            annual_holding_cost_rate: default_annual_holding_cost_rate(),
            capital_gains_tax_rate: default_capital_gains_tax_rate(),
            scenarios: default_scenarios(),
        }
    }
}

impl RoiAssumptions {
    /// Copy with every scenario's appreciation rate replaced.
    #[must_use]
    pub fn with_flat_appreciation(&self, rate: f64) -> Self {
        let mut next = self.clone();
        for scenario in &mut next.scenarios {
            scenario.appreciation_rate = rate;
        }
        next
    }

    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.holding_period_years == 0 {
            return Err(EngineError::invalid(
                "holding_period_years",
                "must be at least one year",
            ));
        }
        if let Some(cost) = self.acquisition_cost {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(EngineError::invalid(
                    "acquisition_cost",
                    format!("must be a positive number, got {cost}"),
                ));
            }
        }
        for (field, rate) in [
            ("transaction_cost_rate", self.transaction_cost_rate),
            ("annual_holding_cost_rate", self.annual_holding_cost_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(EngineError::invalid(
                    field,
                    format!("must be a non-negative fraction, got {rate}"),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.capital_gains_tax_rate) {
            return Err(EngineError::invalid(
                "capital_gains_tax_rate",
                format!("must be within [0, 1], got {}", self.capital_gains_tax_rate),
            ));
        }

        let mut seen = BTreeSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.scenario) {
                return Err(EngineError::invalid(
                    "scenarios",
                    format!("duplicate scenario '{}'", scenario.scenario),
                ));
            }
            if !scenario.appreciation_rate.is_finite() || scenario.appreciation_rate <= -1.0 {
                return Err(EngineError::invalid(
                    "scenarios",
                    format!(
                        "appreciation rate for '{}' must be greater than -1, got {}",
                        scenario.scenario, scenario.appreciation_rate
                    ),
                ));
            }
            if !scenario.cost_multiplier.is_finite() || scenario.cost_multiplier < 0.0 {
                return Err(EngineError::invalid(
                    "scenarios",
                    format!(
                        "cost multiplier for '{}' must be non-negative, got {}",
                        scenario.scenario, scenario.cost_multiplier
                    ),
                ));
            }
        }
        if let Some(missing) = ScenarioKind::ALL.into_iter().find(|kind| !seen.contains(kind)) {
            return Err(EngineError::invalid(
                "scenarios",
                format!("missing scenario '{missing}'"),
            ));
        }
        Ok(())
    }
}

/// Projected outcome of one holding scenario.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RoiScenario {
    pub scenario: ScenarioKind,
    pub holding_period_years: u32,
    /// Projected sale value at the end of the holding period.
    pub sale_value: f64,
    /// Net return after costs and capital-gains tax.
    pub net_return: f64,
    /// Net return as a fraction of the cost basis.
    pub total_return: f64,
    /// Compound annual return as a fraction.
    pub annualized_return: f64,
    /// Years until appreciation covers upfront costs; `None` if never.
    pub break_even_years: Option<f64>,
}
