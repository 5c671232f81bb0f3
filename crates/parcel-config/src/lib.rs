//! # parcel-config
//!
//! Layered configuration for the feasibility engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARCEL_*` prefix, `__` as separator)
//! 2. An explicit file passed to [`EngineConfig::load_from_file`]
//! 3. Project-level `.parcel/config.toml`
//! 4. User-level `~/.config/parcel/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `PARCEL_PRICING__MIN_COMPARABLES` -> `pricing.min_comparables`,
//! `PARCEL_RISK__CRITICAL_CEILING` -> `risk.critical_ceiling`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use parcel_config::EngineConfig;
//!
//! let config = EngineConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("{} zoning codes", config.zoning.len());
//! ```

mod error;
mod overlays;
mod pricing;
mod risk;
mod scoring;
mod zoning;

pub use error::ConfigError;
pub use overlays::OverlayRule;
pub use pricing::{GradeMultipliers, PricingConfig};
pub use risk::{RiskBand, RiskConfig, RiskWeights};
pub use scoring::ScoringConfig;
pub use zoning::ZoneRule;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use parcel_core::entities::RoiAssumptions;
use parcel_core::enums::OverlayFlag;
use serde::{Deserialize, Serialize};

/// Reference data and tunables for one engine instance.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EngineConfig {
    /// Zoning code → base constraints. User tables merge over the built-ins.
    #[serde(default = "zoning::default_registry")]
    pub zoning: BTreeMap<String, ZoneRule>,

    /// Overlay flag (`snake_case`) → rule.
    #[serde(default = "overlays::default_rules")]
    pub overlays: BTreeMap<String, OverlayRule>,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    /// Default return assumptions used when a request supplies none.
    #[serde(default)]
    pub roi: RoiAssumptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoning: zoning::default_registry(),
            overlays: overlays::default_rules(),
            scoring: ScoringConfig::default(),
            pricing: PricingConfig::default(),
            risk: RiskConfig::default(),
            roi: RoiAssumptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from defaults, TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed or
    /// extracted into the config shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit file layered above the project file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `path` does not exist, otherwise
    /// see [`Self::load`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }
        Self::figment_with(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".parcel/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("PARCEL_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parcel").join("config.toml"))
    }

    /// Check every section for malformed values.
    ///
    /// Overlay rules are only checked for well-formed keys here; whether a
    /// rule loosens a constraint is judged by the regulatory analyzer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoning.is_empty() {
            return Err(ConfigError::invalid("zoning", "registry is empty"));
        }
        for (code, rule) in &self.zoning {
            rule.validate(code)?;
        }
        for key in self.overlays.keys() {
            if OverlayFlag::parse(key).is_none() {
                return Err(ConfigError::invalid(
                    format!("overlays.{key}"),
                    "not a known overlay flag",
                ));
            }
        }
        self.scoring.validate()?;
        self.pricing.validate()?;
        self.risk.validate()?;
        self.roi
            .validate()
            .map_err(|e| ConfigError::invalid("roi", e.to_string()))
    }

    #[must_use]
    pub fn zone(&self, code: &str) -> Option<&ZoneRule> {
        self.zoning.get(code)
    }

    #[must_use]
    pub fn overlay_rule(&self, flag: OverlayFlag) -> Option<&OverlayRule> {
        self.overlays.get(flag.as_str())
    }
}
