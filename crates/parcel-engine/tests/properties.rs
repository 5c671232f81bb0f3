//! Invariants that hold across the whole input space we exercise.

mod common;

use common::{as_of, engine, mapo_sales, residential_parcel, stamp};
use parcel_config::EngineConfig;
use parcel_core::entities::{ComparableSalesSet, ParcelRecord, RoiAssumptions};
use parcel_core::enums::{
    Eligibility, EstimationMethod, Grade, OverlayFlag, RiskTier, TerrainClass, Verdict,
};
use parcel_engine::regulatory;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn variants() -> Vec<ParcelRecord> {
    let mut out = Vec::new();
    for terrain in [
        TerrainClass::Flat,
        TerrainClass::Gentle,
        TerrainClass::Moderate,
        TerrainClass::Steep,
    ] {
        for (area, shape) in [(120.0, 0.3), (500.0, 0.9), (2_000.0, 0.6), (8_000.0, 1.0)] {
            for road_access in [true, false] {
                out.push(ParcelRecord {
                    id: format!("{terrain}-{area}-{road_access}"),
                    area_m2: area,
                    shape_regularity: shape,
                    terrain,
                    road_access,
                    ..residential_parcel()
                });
            }
        }
    }
    out
}

#[test]
fn grade_always_matches_composite() {
    let engine = engine();
    let comps = mapo_sales(15);
    for parcel in variants() {
        let report = engine
            .analyze_at(&parcel, &comps, &RoiAssumptions::default(), stamp())
            .unwrap();
        let score = report.score();
        assert!((0.0..=100.0).contains(&score.composite));
        assert_eq!(score.grade, Grade::from_score(score.composite), "{}", parcel.id);
    }
}

#[rstest]
#[case(0)]
#[case(5)]
#[case(9)]
#[case(10)]
#[case(30)]
#[case(31)]
#[case(45)]
fn method_and_confidence_stay_coupled(#[case] sales: u32) {
    let comps = if sales == 0 {
        ComparableSalesSet::empty(as_of())
    } else {
        mapo_sales(sales)
    };
    let report = engine()
        .analyze_at(&residential_parcel(), &comps, &RoiAssumptions::default(), stamp())
        .unwrap();
    let price = report.price();
    assert!(price.method.admits(price.confidence));
    let expected = if sales >= 10 {
        EstimationMethod::Model
    } else {
        EstimationMethod::Heuristic
    };
    assert_eq!(price.method, expected);
}

#[test]
fn ineligible_parcels_withhold_simulation() {
    let parcel = ParcelRecord {
        zoning_code: "industrial-general".into(),
        ..residential_parcel().with_overlay(OverlayFlag::ProtectedZone)
    };
    let report = engine()
        .analyze_at(&parcel, &mapo_sales(40), &RoiAssumptions::default(), stamp())
        .unwrap();
    assert_eq!(report.regulatory().eligibility, Eligibility::Ineligible);
    assert!(report.scenarios().is_empty());
    assert!(report.simulation_withheld());
    assert!(report.risk().tier >= RiskTier::High);
    assert_eq!(report.verdict(), Verdict::NotRecommended);
}

#[test]
fn ineligible_floor_holds_with_a_lenient_ceiling() {
    let mut config = EngineConfig::default();
    config.risk.critical_ceiling = 100.0;
    let engine = parcel_engine::FeasibilityEngine::new(config).unwrap();
    let parcel = ParcelRecord {
        zoning_code: "industrial-general".into(),
        ..residential_parcel().with_overlay(OverlayFlag::ProtectedZone)
    };
    let report = engine
        .analyze_at(&parcel, &mapo_sales(40), &RoiAssumptions::default(), stamp())
        .unwrap();
    assert_eq!(report.risk().tier, RiskTier::High);
    assert!(report.scenarios().is_empty());
}

#[test]
fn critical_risk_vetoes_simulation() {
    let parcel = ParcelRecord {
        terrain: TerrainClass::Steep,
        shape_regularity: 0.1,
        ..residential_parcel()
    };
    let report = engine()
        .analyze_at(&parcel, &mapo_sales(40), &RoiAssumptions::default(), stamp())
        .unwrap();
    assert_eq!(report.regulatory().eligibility, Eligibility::Eligible);
    assert_eq!(report.risk().tier, RiskTier::Critical);
    assert!(report.scenarios().is_empty());
}

#[rstest]
fn adding_an_overlay_never_loosens(
    #[values(
        "residential-general",
        "commercial-general",
        "industrial-semi",
        "green-natural"
    )]
    zoning: &str,
    #[values(
        OverlayFlag::ProtectedZone,
        OverlayFlag::FloodRisk,
        OverlayFlag::CulturalHeritage,
        OverlayFlag::MilitaryFacility,
        OverlayFlag::Landscape,
        OverlayFlag::HeightRestriction,
        OverlayFlag::DevelopmentRestriction,
        OverlayFlag::DistrictUnitPlan
    )]
    added: OverlayFlag,
) {
    let config = EngineConfig::default();
    let base = ParcelRecord {
        zoning_code: zoning.into(),
        ..residential_parcel().with_overlay(OverlayFlag::FloodRisk)
    };
    let before = regulatory::analyze(&base, &config).unwrap();
    let Ok(after) = regulatory::analyze(&base.with_overlay(added), &config) else {
        // incompatible combinations are rejected outright
        return;
    };

    assert!(after.max_build_ratio <= before.max_build_ratio);
    assert!(after.max_floor_area_ratio <= before.max_floor_area_ratio);
    assert!(after.allowed_uses.is_subset(&before.allowed_uses));
    assert!(after.eligibility >= before.eligibility);
    for constraint in &before.binding_constraints {
        assert!(after.binding_constraints.contains(constraint));
    }

    let engine = engine();
    let comps = mapo_sales(40);
    let assumptions = RoiAssumptions::default();
    let before = engine
        .analyze_at(&base, &comps, &assumptions, stamp())
        .expect("base parcel analyzes");
    let after = engine
        .analyze_at(&base.with_overlay(added), &comps, &assumptions, stamp())
        .expect("compatible overlay analyzes");
    assert!(after.score().composite <= before.score().composite);
    assert!(after.risk().tier >= before.risk().tier);
}
