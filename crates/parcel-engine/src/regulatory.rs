//! Regulatory analyzer: zoning code + overlay flags → legal build constraints.
//!
//! Overlays are applied in the fixed [`OverlayFlag`] order: caps take the
//! minimum, factors multiply and prohibited uses are removed. A cap and a
//! factor from different overlays do not commute, so that order is part of
//! the result. Whether an overlay is *binding* is judged against the base
//! zone alone; adding an overlay can therefore never un-bind another one.

use std::collections::BTreeSet;

use parcel_config::{EngineConfig, OverlayRule, ZoneRule};
use parcel_core::EngineError;
use parcel_core::entities::{BuildingEnvelope, OverlayConstraint, ParcelRecord, RegulatoryResult};
use parcel_core::enums::{Eligibility, OverlayFlag, UseCategory};
use parcel_core::units;

/// Resolve the parcel's zoning and overlays into a [`RegulatoryResult`].
///
/// # Errors
///
/// - `UnknownZoningCode` if the zoning code is not in the registry.
/// - `InvalidOverlayCombination` if a flag has no rule, a rule would loosen
///   the base constraint, or two mutually incompatible flags co-occur.
pub fn analyze(
    parcel: &ParcelRecord,
    config: &EngineConfig,
) -> Result<RegulatoryResult, EngineError> {
    let zone = config
        .zone(&parcel.zoning_code)
        .ok_or_else(|| EngineError::UnknownZoningCode {
            code: parcel.zoning_code.clone(),
        })?;

    let rules = resolve_overlays(&parcel.overlays, config)?;

    let mut build_ratio = zone.max_build_ratio;
    let mut floor_area_ratio = zone.floor_area_ratio;
    let mut allowed_uses = zone.allowed_uses.clone();
    let mut binding_constraints = Vec::new();

    for (flag, rule) in rules {
        if let Some(cap) = rule.build_ratio_cap {
            build_ratio = build_ratio.min(cap);
        }
        if let Some(factor) = rule.build_ratio_factor {
            build_ratio *= factor;
        }
        if let Some(cap) = rule.floor_area_ratio_cap {
            floor_area_ratio = floor_area_ratio.min(cap);
        }
        for category in &rule.prohibited_uses {
            allowed_uses.remove(category);
        }

        if let Some(constraint) = binding_part(flag, rule, zone) {
            tracing::debug!(parcel = %parcel.id, overlay = %flag, "overlay is binding");
            binding_constraints.push(constraint);
        }
    }

    let eligibility = if allowed_uses.is_empty() || build_ratio <= 0.0 {
        Eligibility::Ineligible
    } else if binding_constraints.is_empty() {
        Eligibility::Eligible
    } else {
        Eligibility::ConditionallyEligible
    };

    let envelope = BuildingEnvelope {
        area_pyeong: parcel.area_pyeong(),
        buildable_footprint_m2: units::round2(parcel.area_m2 * build_ratio),
        max_floor_area_m2: units::round2(parcel.area_m2 * floor_area_ratio),
    };

    Ok(RegulatoryResult {
        zoning_code: parcel.zoning_code.clone(),
        eligibility,
        max_build_ratio: build_ratio,
        max_floor_area_ratio: floor_area_ratio,
        allowed_uses,
        binding_constraints,
        envelope,
    })
}

fn resolve_overlays<'a>(
    flags: &BTreeSet<OverlayFlag>,
    config: &'a EngineConfig,
) -> Result<Vec<(OverlayFlag, &'a OverlayRule)>, EngineError> {
    let mut rules = Vec::with_capacity(flags.len());
    for &flag in flags {
        let rule = config
            .overlay_rule(flag)
            .ok_or_else(|| overlay_error(format!("no rule configured for overlay '{flag}'")))?;
        check_tightens(flag, rule)?;
        if let Some(conflict) = rule.incompatible_with.iter().find(|f| flags.contains(f)) {
            return Err(overlay_error(format!(
                "'{flag}' cannot be combined with '{conflict}'"
            )));
        }
        rules.push((flag, rule));
    }
    Ok(rules)
}

fn check_tightens(flag: OverlayFlag, rule: &OverlayRule) -> Result<(), EngineError> {
    if let Some(factor) = rule.build_ratio_factor {
        if !(0.0..=1.0).contains(&factor) {
            return Err(overlay_error(format!(
                "'{flag}' build ratio factor {factor} is outside [0, 1]"
            )));
        }
    }
    if let Some(cap) = rule.build_ratio_cap {
        if !(0.0..=1.0).contains(&cap) {
            return Err(overlay_error(format!(
                "'{flag}' build ratio cap {cap} is outside [0, 1]"
            )));
        }
    }
    if let Some(cap) = rule.floor_area_ratio_cap {
        if !cap.is_finite() || cap < 0.0 {
            return Err(overlay_error(format!(
                "'{flag}' floor area ratio cap {cap} is negative"
            )));
        }
    }
    Ok(())
}

/// The parts of `rule` that actually tighten the base zone, if any.
fn binding_part(flag: OverlayFlag, rule: &OverlayRule, zone: &ZoneRule) -> Option<OverlayConstraint> {
    let build_ratio_cap = rule.build_ratio_cap.filter(|&cap| cap < zone.max_build_ratio);
    let build_ratio_factor = rule
        .build_ratio_factor
        .filter(|&factor| factor < 1.0 && zone.max_build_ratio > 0.0);
    let floor_area_ratio_cap = rule
        .floor_area_ratio_cap
        .filter(|&cap| cap < zone.floor_area_ratio);
    let removed_uses: BTreeSet<UseCategory> = rule
        .prohibited_uses
        .intersection(&zone.allowed_uses)
        .copied()
        .collect();

    let binds = build_ratio_cap.is_some()
        || build_ratio_factor.is_some()
        || floor_area_ratio_cap.is_some()
        || !removed_uses.is_empty();

    binds.then_some(OverlayConstraint {
        overlay: flag,
        build_ratio_cap,
        build_ratio_factor,
        floor_area_ratio_cap,
        removed_uses,
    })
}

fn overlay_error(reason: String) -> EngineError {
    EngineError::InvalidOverlayCombination { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::enums::TerrainClass;
    use pretty_assertions::assert_eq;

    fn parcel(zoning: &str, overlays: &[OverlayFlag]) -> ParcelRecord {
        ParcelRecord {
            id: "lot-1".into(),
            area_m2: 500.0,
            zoning_code: zoning.into(),
            district: "mapo".into(),
            declared_price: None,
            road_access: true,
            shape_regularity: 0.9,
            terrain: TerrainClass::Flat,
            location: None,
            overlays: overlays.iter().copied().collect(),
            notes: None,
        }
    }

    #[test]
    fn plain_zone_is_eligible() {
        let result = analyze(&parcel("residential-general", &[]), &EngineConfig::default()).unwrap();
        assert_eq!(result.eligibility, Eligibility::Eligible);
        assert!(result.binding_constraints.is_empty());
        assert!((result.max_build_ratio - 0.6).abs() < 1e-12);
        assert!((result.envelope.buildable_footprint_m2 - 300.0).abs() < 1e-9);
        assert!((result.envelope.max_floor_area_m2 - 1_250.0).abs() < 1e-9);
        assert!((result.envelope.area_pyeong - 151.25).abs() < 1e-9);
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = analyze(&parcel("lunar-colony", &[]), &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownZoningCode {
                code: "lunar-colony".into()
            }
        );
    }

    #[test]
    fn flood_factor_binds_and_multiplies() {
        let result = analyze(
            &parcel("residential-general", &[OverlayFlag::FloodRisk]),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(result.eligibility, Eligibility::ConditionallyEligible);
        assert_eq!(result.binding_count(), 1);
        assert!((result.max_build_ratio - 0.48).abs() < 1e-12);
    }

    #[test]
    fn non_tightening_overlay_is_not_binding() {
        // green-natural FAR 1.0 already sits below the landscape cap of 2.0
        let result = analyze(
            &parcel("green-natural", &[OverlayFlag::Landscape]),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(result.eligibility, Eligibility::Eligible);
        assert!(result.binding_constraints.is_empty());
    }

    #[test]
    fn removing_every_use_is_ineligible() {
        let result = analyze(
            &parcel("industrial-general", &[OverlayFlag::ProtectedZone]),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(result.eligibility, Eligibility::Ineligible);
        assert!(result.allowed_uses.is_empty());
    }

    #[test]
    fn incompatible_overlays_are_rejected() {
        let err = analyze(
            &parcel(
                "residential-general",
                &[
                    OverlayFlag::DevelopmentRestriction,
                    OverlayFlag::DistrictUnitPlan,
                ],
            ),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_overlay_combination");
    }

    #[test]
    fn loosening_factor_is_rejected() {
        let mut config = EngineConfig::default();
        config
            .overlays
            .get_mut("flood_risk")
            .unwrap()
            .build_ratio_factor = Some(1.3);
        let err = analyze(&parcel("residential-general", &[OverlayFlag::FloodRisk]), &config)
            .unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn missing_rule_is_rejected() {
        let mut config = EngineConfig::default();
        config.overlays.remove("landscape");
        let err = analyze(&parcel("residential-general", &[OverlayFlag::Landscape]), &config)
            .unwrap_err();
        assert!(err.to_string().contains("no rule configured"));
    }

    #[test]
    fn caps_and_factors_compose() {
        let result = analyze(
            &parcel(
                "commercial-general",
                &[OverlayFlag::CulturalHeritage, OverlayFlag::MilitaryFacility],
            ),
            &EngineConfig::default(),
        )
        .unwrap();
        // min(0.8, 0.5) * 0.7
        assert!((result.max_build_ratio - 0.35).abs() < 1e-12);
        assert!((result.max_floor_area_ratio - 2.0).abs() < 1e-12);
        assert_eq!(result.binding_count(), 2);
        assert!(!result.permits(UseCategory::Industrial));
    }

    #[test]
    fn factor_before_cap_follows_flag_order() {
        // flood_risk (x0.8) precedes development_restriction (cap 0.2):
        // min(0.6 * 0.8, 0.2), not min(0.6, 0.2) * 0.8
        let result = analyze(
            &parcel(
                "residential-general",
                &[OverlayFlag::DevelopmentRestriction, OverlayFlag::FloodRisk],
            ),
            &EngineConfig::default(),
        )
        .unwrap();
        assert!((result.max_build_ratio - 0.2).abs() < 1e-12);
    }
}
