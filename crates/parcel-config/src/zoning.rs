//! Zoning registry: zoning code → base build constraints.
//!
//! The built-in table covers the standard national use districts. Deployments
//! extend or override entries through `[zoning.<code>]` tables.

use std::collections::{BTreeMap, BTreeSet};

use parcel_core::enums::UseCategory;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base constraints for one zoning code.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ZoneRule {
    /// Human-readable district name.
    #[serde(default)]
    pub label: String,

    /// Maximum building-coverage ratio in `[0, 1]`.
    pub max_build_ratio: f64,

    /// Maximum floor-area ratio (1.0 = 100%).
    pub floor_area_ratio: f64,

    /// Development-intensity tier used as a price-model feature (1 = lowest).
    pub tier: u8,

    pub allowed_uses: BTreeSet<UseCategory>,
}

impl ZoneRule {
    fn new(label: &str, bcr: f64, far: f64, tier: u8, uses: &[UseCategory]) -> Self {
        Self {
            label: label.to_string(),
            max_build_ratio: bcr,
            floor_area_ratio: far,
            tier,
            allowed_uses: uses.iter().copied().collect(),
        }
    }

    pub(crate) fn validate(&self, code: &str) -> Result<(), ConfigError> {
        let field = |name: &str| format!("zoning.{code}.{name}");
        if !(0.0..=1.0).contains(&self.max_build_ratio) {
            return Err(ConfigError::invalid(
                field("max_build_ratio"),
                format!("must be within [0, 1], got {}", self.max_build_ratio),
            ));
        }
        if !self.floor_area_ratio.is_finite() || self.floor_area_ratio < 0.0 {
            return Err(ConfigError::invalid(
                field("floor_area_ratio"),
                format!("must be non-negative, got {}", self.floor_area_ratio),
            ));
        }
        if self.tier == 0 {
            return Err(ConfigError::invalid(field("tier"), "must be at least 1"));
        }
        Ok(())
    }
}

/// The built-in zoning registry.
#[must_use]
pub fn default_registry() -> BTreeMap<String, ZoneRule> {
    use UseCategory::{Agricultural, Commercial, Industrial, Residential};

    [
        (
            "residential-exclusive-1",
            ZoneRule::new("Class 1 exclusive residential", 0.5, 1.0, 1, &[Residential]),
        ),
        (
            "residential-exclusive-2",
            ZoneRule::new("Class 2 exclusive residential", 0.5, 1.5, 2, &[Residential]),
        ),
        (
            "residential-general-1",
            ZoneRule::new(
                "Class 1 general residential",
                0.6,
                2.0,
                3,
                &[Residential, Commercial],
            ),
        ),
        (
            "residential-general",
            ZoneRule::new(
                "Class 2 general residential",
                0.6,
                2.5,
                4,
                &[Residential, Commercial],
            ),
        ),
        (
            "residential-general-3",
            ZoneRule::new(
                "Class 3 general residential",
                0.5,
                3.0,
                5,
                &[Residential, Commercial],
            ),
        ),
        (
            "residential-semi",
            ZoneRule::new("Semi-residential", 0.7, 5.0, 6, &[Residential, Commercial]),
        ),
        (
            "commercial-central",
            ZoneRule::new("Central commercial", 0.9, 15.0, 10, &[Commercial, Residential]),
        ),
        (
            "commercial-general",
            ZoneRule::new("General commercial", 0.8, 13.0, 9, &[Commercial, Residential]),
        ),
        (
            "commercial-neighborhood",
            ZoneRule::new(
                "Neighborhood commercial",
                0.7,
                9.0,
                8,
                &[Commercial, Residential],
            ),
        ),
        (
            "industrial-general",
            ZoneRule::new("General industrial", 0.7, 3.5, 7, &[Industrial]),
        ),
        (
            "industrial-semi",
            ZoneRule::new(
                "Semi-industrial",
                0.7,
                4.0,
                7,
                &[Industrial, Commercial, Residential],
            ),
        ),
        (
            "green-natural",
            ZoneRule::new("Natural green", 0.2, 1.0, 2, &[Residential, Agricultural]),
        ),
        (
            "green-production",
            ZoneRule::new("Production green", 0.2, 1.0, 1, &[Agricultural]),
        ),
        (
            "green-conservation",
            ZoneRule::new("Conservation green", 0.2, 0.8, 1, &[Agricultural]),
        ),
    ]
    .into_iter()
    .map(|(code, rule)| (code.to_string(), rule))
    .collect()
}
