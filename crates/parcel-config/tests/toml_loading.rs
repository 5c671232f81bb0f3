//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use parcel_config::{ConfigError, EngineConfig};
use parcel_core::enums::{OverlayFlag, RiskTier, UseCategory};
use pretty_assertions::assert_eq;

#[test]
fn loads_pricing_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[pricing]
recency_window_days = 365
min_comparables = 5
high_confidence_comparables = 20
default_price_per_m2 = 750000.0

[pricing.grade_multipliers]
s = 1.5
a = 1.2
b = 1.0
c = 0.8
d = 0.5
",
        )?;

        let config: EngineConfig = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.pricing.recency_window_days, 365);
        assert_eq!(config.pricing.min_comparables, 5);
        assert_eq!(config.pricing.high_confidence_comparables, 20);
        assert!((config.pricing.default_price_per_m2 - 750_000.0).abs() < f64::EPSILON);
        assert!((config.pricing.grade_multipliers.s - 1.5).abs() < f64::EPSILON);
        // untouched keys keep their defaults
        assert!((config.pricing.interval_z - 1.96).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn custom_zone_merges_over_builtin_registry() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[zoning.planned-management]
label = "Planned management"
max_build_ratio = 0.4
floor_area_ratio = 1.0
tier = 3
allowed_uses = ["residential", "commercial"]
"#,
        )?;

        let config: EngineConfig = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        let zone = config.zone("planned-management").expect("custom zone present");
        assert_eq!(zone.tier, 3);
        assert!(zone.allowed_uses.contains(&UseCategory::Commercial));
        assert!(config.zone("residential-general").is_some());
        assert_eq!(config.zoning.len(), 15);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn overlay_rule_can_be_tightened_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[overlays.flood_risk]
build_ratio_factor = 0.5
",
        )?;

        let config: EngineConfig = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        let rule = config.overlay_rule(OverlayFlag::FloodRisk).unwrap();
        assert_eq!(rule.build_ratio_factor, Some(0.5));
        Ok(())
    });
}

#[test]
fn risk_bands_load_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[risk]
critical_ceiling = 85.0

[[risk.bands]]
below = 20.0
tier = "low"

[[risk.bands]]
below = 45.0
tier = "medium"
"#,
        )?;

        let config: EngineConfig = Figment::from(Serialized::defaults(EngineConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.risk.band(25.0), RiskTier::Medium);
        assert_eq!(config.risk.band(45.0), RiskTier::High);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_dir(".parcel")?;
        jail.create_file(
            ".parcel/config.toml",
            r"
[scoring]
efficient_area_min_m2 = 200.0
",
        )?;

        let config = EngineConfig::load().expect("config loads");
        assert!((config.scoring.efficient_area_min_m2 - 200.0).abs() < f64::EPSILON);
        assert!((config.scoring.efficient_area_max_m2 - 3_300.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".parcel")?;
        jail.create_file(
            ".parcel/config.toml",
            "[pricing]\nmin_comparables = 12\n",
        )?;
        jail.create_file("override.toml", "[pricing]\nmin_comparables = 15\n")?;

        let config = EngineConfig::load_from_file(std::path::Path::new("override.toml"))
            .expect("config loads");
        assert_eq!(config.pricing.min_comparables, 15);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = EngineConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile { .. }));
}

#[test]
fn malformed_value_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[pricing]\nmin_comparables = \"many\"\n")?;

        let result: Result<EngineConfig, _> =
            Figment::from(Serialized::defaults(EngineConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
