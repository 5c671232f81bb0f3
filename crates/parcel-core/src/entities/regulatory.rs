use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Eligibility, OverlayFlag, UseCategory};

/// An overlay whose restriction is tighter than the base zoning constraint.
///
/// Only the parts of the overlay rule that bind against the base zone are
/// recorded; a cap above the zone's own ratio is left out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OverlayConstraint {
    pub overlay: OverlayFlag,
    pub build_ratio_cap: Option<f64>,
    pub build_ratio_factor: Option<f64>,
    pub floor_area_ratio_cap: Option<f64>,
    /// Base-zone uses this overlay prohibits.
    pub removed_uses: BTreeSet<UseCategory>,
}

/// Buildable volume derived from the effective ratios.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BuildingEnvelope {
    pub area_pyeong: f64,
    pub buildable_footprint_m2: f64,
    pub max_floor_area_m2: f64,
}

/// Legal build constraints for a parcel after overlays are applied.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RegulatoryResult {
    pub zoning_code: String,
    pub eligibility: Eligibility,
    /// Maximum building-coverage ratio in `[0, 1]`.
    pub max_build_ratio: f64,
    /// Maximum floor-area ratio (gross floor area / site area).
    pub max_floor_area_ratio: f64,
    pub allowed_uses: BTreeSet<UseCategory>,
    pub binding_constraints: Vec<OverlayConstraint>,
    pub envelope: BuildingEnvelope,
}

impl RegulatoryResult {
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.binding_constraints.len()
    }

    #[must_use]
    pub fn permits(&self, category: UseCategory) -> bool {
        self.allowed_uses.contains(&category)
    }
}
