use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{OverlayFlag, TerrainClass};
use crate::errors::EngineError;
use crate::units;

/// WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A land parcel submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ParcelRecord {
    pub id: String,
    /// Parcel area in square metres. Must be positive.
    pub area_m2: f64,
    /// Zoning / use-district code, resolved through the zoning registry.
    pub zoning_code: String,
    /// Market district used to select comparable sales.
    pub district: String,
    /// Asking or declared price for the whole parcel, if known.
    #[serde(default)]
    pub declared_price: Option<f64>,
    pub road_access: bool,
    /// Shape regularity in `[0, 1]`; 1 is a perfect rectangle.
    pub shape_regularity: f64,
    pub terrain: TerrainClass,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub overlays: BTreeSet<OverlayFlag>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ParcelRecord {
    /// Check the record's own invariants (zoning resolution happens later).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::invalid("id", "must not be empty"));
        }
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(EngineError::invalid(
                "area_m2",
                format!("must be a positive number, got {}", self.area_m2),
            ));
        }
        if !(0.0..=1.0).contains(&self.shape_regularity) {
            return Err(EngineError::invalid(
                "shape_regularity",
                format!("must be within [0, 1], got {}", self.shape_regularity),
            ));
        }
        if let Some(price) = self.declared_price {
            if !price.is_finite() || price < 0.0 {
                return Err(EngineError::invalid(
                    "declared_price",
                    format!("must be a non-negative number, got {price}"),
                ));
            }
        }
        if let Some(loc) = self.location {
            if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lon) {
                return Err(EngineError::invalid(
                    "location",
                    format!("({}, {}) is not a valid coordinate", loc.lat, loc.lon),
                ));
            }
        }
        Ok(())
    }

    /// Area converted to pyeong.
    #[must_use]
    pub fn area_pyeong(&self) -> f64 {
        units::m2_to_pyeong(self.area_m2)
    }

    /// Copy of this record with one more overlay flag.
    #[must_use]
    pub fn with_overlay(&self, flag: OverlayFlag) -> Self {
        let mut next = self.clone();
        next.overlays.insert(flag);
        next
    }
}
