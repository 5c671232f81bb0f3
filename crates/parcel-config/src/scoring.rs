//! Development-potential scorer tunables.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_efficient_area_min() -> f64 {
    330.0
}

const fn default_efficient_area_max() -> f64 {
    3_300.0
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScoringConfig {
    /// Lower bound (inclusive, m²) of the size band that earns the area points.
    #[serde(default = "default_efficient_area_min")]
    pub efficient_area_min_m2: f64,

    /// Upper bound (inclusive, m²) of the efficient size band.
    #[serde(default = "default_efficient_area_max")]
    pub efficient_area_max_m2: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            efficient_area_min_m2: default_efficient_area_min(),
            efficient_area_max_m2: default_efficient_area_max(),
        }
    }
}

impl ScoringConfig {
    /// Whether `area_m2` falls inside the efficient band.
    #[must_use]
    pub fn in_efficient_band(&self, area_m2: f64) -> bool {
        (self.efficient_area_min_m2..=self.efficient_area_max_m2).contains(&area_m2)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.efficient_area_min_m2.is_finite() || self.efficient_area_min_m2 < 0.0 {
            return Err(ConfigError::invalid(
                "scoring.efficient_area_min_m2",
                "must be a non-negative area",
            ));
        }
        if !self.efficient_area_max_m2.is_finite()
            || self.efficient_area_max_m2 < self.efficient_area_min_m2
        {
            return Err(ConfigError::invalid(
                "scoring.efficient_area_max_m2",
                format!(
                    "must be at least efficient_area_min_m2 ({}), got {}",
                    self.efficient_area_min_m2, self.efficient_area_max_m2
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_inclusive() {
        let config = ScoringConfig::default();
        assert!(config.in_efficient_band(330.0));
        assert!(config.in_efficient_band(3_300.0));
        assert!(!config.in_efficient_band(329.9));
        assert!(!config.in_efficient_band(5_000.0));
    }

    #[test]
    fn inverted_band_is_rejected() {
        let config = ScoringConfig {
            efficient_area_min_m2: 1_000.0,
            efficient_area_max_m2: 500.0,
        };
        assert!(config.validate().is_err());
    }
}
