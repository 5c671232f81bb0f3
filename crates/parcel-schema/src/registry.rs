//! Central schema registry for engine input and output types.

use std::collections::BTreeMap;

use parcel_core::entities::{
    ComparableSale, ComparableSalesSet, FeasibilityReport, InvestorProfile, MarketTrend,
    MatchResult, ParcelRecord, PriceEstimate, RegulatoryResult, RiskProfile, RoiAssumptions,
    RoiScenario, ScoreResult,
};
use schemars::schema_for;
use serde::Serialize;

use crate::error::SchemaError;

/// Registered schemas, keyed by `snake_case` type name.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = BTreeMap::new();

        // --- Inputs ---
        register!(schemas, "parcel_record", ParcelRecord);
        register!(schemas, "comparable_sale", ComparableSale);
        register!(schemas, "comparable_sales_set", ComparableSalesSet);
        register!(schemas, "roi_assumptions", RoiAssumptions);
        register!(schemas, "investor_profile", InvestorProfile);

        // --- Report and its parts ---
        register!(schemas, "feasibility_report", FeasibilityReport);
        register!(schemas, "regulatory_result", RegulatoryResult);
        register!(schemas, "score_result", ScoreResult);
        register!(schemas, "price_estimate", PriceEstimate);
        register!(schemas, "risk_profile", RiskProfile);
        register!(schemas, "roi_scenario", RoiScenario);
        register!(schemas, "market_trend", MarketTrend);

        // --- Matching ---
        register!(schemas, "match_result", MatchResult);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown name, `ValidationFailed` listing every
    /// violation otherwise.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Compilation(e.to_string()))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{}: {e}", e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// Serialize `value` and validate it against a named schema.
    ///
    /// # Errors
    ///
    /// As [`Self::validate`]; serialization failures surface as
    /// `ValidationFailed` with a single message.
    pub fn validate_value<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SchemaError> {
        let instance = serde_json::to_value(value).map_err(|e| SchemaError::ValidationFailed {
            schema: name.to_string(),
            errors: vec![e.to_string()],
        })?;
        self.validate(name, &instance)
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        self.schemas.keys().copied().collect()
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
