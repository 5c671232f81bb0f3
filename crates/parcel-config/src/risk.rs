//! Risk analyzer tunables: critical ceiling, category weights, tier bands.

use parcel_core::enums::RiskTier;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_critical_ceiling() -> f64 {
    90.0
}

/// One row of the banding table: weighted scores strictly below `below` map to `tier`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct RiskBand {
    pub below: f64,
    pub tier: RiskTier,
}

fn default_bands() -> Vec<RiskBand> {
    vec![
        RiskBand {
            below: 30.0,
            tier: RiskTier::Low,
        },
        RiskBand {
            below: 55.0,
            tier: RiskTier::Medium,
        },
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RiskWeights {
    pub legal: f64,
    pub market: f64,
    pub development: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            legal: 0.4,
            market: 0.3,
            development: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RiskConfig {
    /// Any sub-score strictly above this makes the parcel Critical.
    #[serde(default = "default_critical_ceiling")]
    pub critical_ceiling: f64,

    #[serde(default)]
    pub weights: RiskWeights,

    /// Ascending bands; scores past the last band are High.
    #[serde(default = "default_bands")]
    pub bands: Vec<RiskBand>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            critical_ceiling: default_critical_ceiling(),
            weights: RiskWeights::default(),
            bands: default_bands(),
        }
    }
}

impl RiskConfig {
    /// Tier for a weighted (non-critical) risk score.
    #[must_use]
    pub fn band(&self, weighted: f64) -> RiskTier {
        self.bands
            .iter()
            .find(|band| weighted < band.below)
            .map_or(RiskTier::High, |band| band.tier)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.critical_ceiling) {
            return Err(ConfigError::invalid(
                "risk.critical_ceiling",
                format!("must be within [0, 100], got {}", self.critical_ceiling),
            ));
        }
        let w = &self.weights;
        if [w.legal, w.market, w.development]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::invalid("risk.weights", "must be non-negative"));
        }
        let total = w.legal + w.market + w.development;
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::invalid(
                "risk.weights",
                format!("must sum to 1, got {total}"),
            ));
        }
        if !self.bands.windows(2).all(|pair| {
            pair[0].below < pair[1].below && pair[0].tier < pair[1].tier
        }) {
            return Err(ConfigError::invalid(
                "risk.bands",
                "bands must ascend in both threshold and tier",
            ));
        }
        if self
            .bands
            .iter()
            .any(|band| matches!(band.tier, RiskTier::High | RiskTier::Critical))
        {
            return Err(ConfigError::invalid(
                "risk.bands",
                "high is the implicit last band and critical is reserved for the ceiling",
            ));
        }
        Ok(())
    }
}
