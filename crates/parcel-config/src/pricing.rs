//! Price predictor tunables.

use parcel_core::enums::Grade;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_recency_window_days() -> u32 {
    730
}

const fn default_min_comparables() -> usize {
    10
}

const fn default_high_confidence_comparables() -> usize {
    30
}

const fn default_price_per_m2() -> f64 {
    1_000_000.0
}

const fn default_heuristic_band() -> f64 {
    0.15
}

const fn default_interval_z() -> f64 {
    1.96
}

const fn default_ridge_lambda() -> f64 {
    1e-3
}

/// Heuristic price multiplier per development grade.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GradeMultipliers {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeMultipliers {
    fn default() -> Self {
        Self {
            s: 1.20,
            a: 1.10,
            b: 1.00,
            c: 0.90,
            d: 0.80,
        }
    }
}

impl GradeMultipliers {
    #[must_use]
    pub const fn for_grade(&self, grade: Grade) -> f64 {
        match grade {
            Grade::S => self.s,
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PricingConfig {
    /// Only sales at most this many days before the set's `as_of` feed the model.
    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: u32,

    /// Below this many usable sales the model path reports insufficient data.
    #[serde(default = "default_min_comparables")]
    pub min_comparables: usize,

    /// Strictly more sales than this yields High confidence.
    #[serde(default = "default_high_confidence_comparables")]
    pub high_confidence_comparables: usize,

    /// Fallback price per m² when the district has no sales at all.
    #[serde(default = "default_price_per_m2")]
    pub default_price_per_m2: f64,

    /// Half-width of the heuristic interval as a fraction of the point.
    #[serde(default = "default_heuristic_band")]
    pub heuristic_band: f64,

    /// Normal quantile for the model interval.
    #[serde(default = "default_interval_z")]
    pub interval_z: f64,

    /// Ridge penalty on standardized coefficients.
    #[serde(default = "default_ridge_lambda")]
    pub ridge_lambda: f64,

    #[serde(default)]
    pub grade_multipliers: GradeMultipliers,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            recency_window_days: default_recency_window_days(),
            min_comparables: default_min_comparables(),
            high_confidence_comparables: default_high_confidence_comparables(),
            default_price_per_m2: default_price_per_m2(),
            heuristic_band: default_heuristic_band(),
            interval_z: default_interval_z(),
            ridge_lambda: default_ridge_lambda(),
            grade_multipliers: GradeMultipliers::default(),
        }
    }
}

impl PricingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.recency_window_days == 0 {
            return Err(ConfigError::invalid(
                "pricing.recency_window_days",
                "must be a positive number of days",
            ));
        }
        if self.min_comparables < 2 {
            return Err(ConfigError::invalid(
                "pricing.min_comparables",
                "a regression needs at least two sales",
            ));
        }
        if self.high_confidence_comparables < self.min_comparables {
            return Err(ConfigError::invalid(
                "pricing.high_confidence_comparables",
                "must not be below min_comparables",
            ));
        }
        if !self.default_price_per_m2.is_finite() || self.default_price_per_m2 <= 0.0 {
            return Err(ConfigError::invalid(
                "pricing.default_price_per_m2",
                "must be a positive price",
            ));
        }
        if !(0.0..1.0).contains(&self.heuristic_band) {
            return Err(ConfigError::invalid(
                "pricing.heuristic_band",
                format!("must be within [0, 1), got {}", self.heuristic_band),
            ));
        }
        if !self.interval_z.is_finite() || self.interval_z <= 0.0 {
            return Err(ConfigError::invalid("pricing.interval_z", "must be positive"));
        }
        if !self.ridge_lambda.is_finite() || self.ridge_lambda < 0.0 {
            return Err(ConfigError::invalid(
                "pricing.ridge_lambda",
                "must be non-negative",
            ));
        }
        for grade in Grade::ALL {
            let multiplier = self.grade_multipliers.for_grade(grade);
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::invalid(
                    "pricing.grade_multipliers",
                    format!("multiplier for grade {grade} must be positive, got {multiplier}"),
                ));
            }
        }
        Ok(())
    }
}
