//! Overlay rules: restrictions layered on top of the base zoning.
//!
//! Keys are the `snake_case` overlay flag names. A rule may only tighten the
//! base constraint; the regulatory analyzer rejects rules that would loosen it.

use std::collections::{BTreeMap, BTreeSet};

use parcel_core::enums::{OverlayFlag, UseCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OverlayRule {
    #[serde(default)]
    pub description: String,

    /// Upper bound on the building-coverage ratio.
    #[serde(default)]
    pub build_ratio_cap: Option<f64>,

    /// Multiplier on the building-coverage ratio, within `[0, 1]`.
    #[serde(default)]
    pub build_ratio_factor: Option<f64>,

    /// Upper bound on the floor-area ratio.
    #[serde(default)]
    pub floor_area_ratio_cap: Option<f64>,

    #[serde(default)]
    pub prohibited_uses: BTreeSet<UseCategory>,

    /// Overlays that cannot legally apply to the same parcel.
    #[serde(default)]
    pub incompatible_with: BTreeSet<OverlayFlag>,
}

/// The built-in overlay rule table, one rule per [`OverlayFlag`].
#[must_use]
pub fn default_rules() -> BTreeMap<String, OverlayRule> {
    use UseCategory::{Agricultural, Commercial, Industrial, Residential};

    let rules = [
        (
            OverlayFlag::ProtectedZone,
            OverlayRule {
                description: "Natural environment protection area".into(),
                build_ratio_cap: Some(0.2),
                floor_area_ratio_cap: Some(0.8),
                prohibited_uses: BTreeSet::from([Industrial]),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::FloodRisk,
            OverlayRule {
                description: "Designated flood hazard area".into(),
                build_ratio_factor: Some(0.8),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::CulturalHeritage,
            OverlayRule {
                description: "Historic and cultural environment preservation area".into(),
                build_ratio_cap: Some(0.5),
                floor_area_ratio_cap: Some(2.0),
                prohibited_uses: BTreeSet::from([Industrial]),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::MilitaryFacility,
            OverlayRule {
                description: "Military facility protection zone".into(),
                build_ratio_factor: Some(0.7),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::Landscape,
            OverlayRule {
                description: "Landscape district".into(),
                floor_area_ratio_cap: Some(2.0),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::HeightRestriction,
            OverlayRule {
                description: "Height restriction district".into(),
                floor_area_ratio_cap: Some(1.5),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::DevelopmentRestriction,
            OverlayRule {
                description: "Development restriction zone (green belt)".into(),
                build_ratio_cap: Some(0.2),
                floor_area_ratio_cap: Some(1.0),
                prohibited_uses: BTreeSet::from([Residential, Commercial, Industrial]),
                incompatible_with: BTreeSet::from([OverlayFlag::DistrictUnitPlan]),
                ..OverlayRule::default()
            },
        ),
        (
            OverlayFlag::DistrictUnitPlan,
            OverlayRule {
                description: "District unit plan area".into(),
                prohibited_uses: BTreeSet::from([Agricultural]),
                incompatible_with: BTreeSet::from([OverlayFlag::DevelopmentRestriction]),
                ..OverlayRule::default()
            },
        ),
    ];

    rules
        .into_iter()
        .map(|(flag, rule)| (flag.as_str().to_string(), rule))
        .collect()
}
