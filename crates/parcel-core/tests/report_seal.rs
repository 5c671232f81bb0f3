//! Invariant enforcement on `ReportParts::seal` and schema conformance of
//! the sealed report.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use parcel_core::EngineError;
use parcel_core::entities::*;
use parcel_core::enums::*;
use pretty_assertions::assert_eq;
use schemars::schema_for;

fn contributions(values: [f64; 6]) -> BTreeMap<ScoreFactor, f64> {
    ScoreFactor::ALL.into_iter().zip(values).collect()
}

fn scenario(kind: ScenarioKind) -> RoiScenario {
    RoiScenario {
        scenario: kind,
        holding_period_years: 5,
        sale_value: 1_159_274_074.0,
        net_return: 56_000_000.0,
        total_return: 0.056,
        annualized_return: 0.011,
        break_even_years: Some(1.3),
    }
}

fn parts() -> ReportParts {
    ReportParts {
        parcel_id: "lot-7".into(),
        generated_at: Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap(),
        regulatory: RegulatoryResult {
            zoning_code: "residential-general".into(),
            eligibility: Eligibility::Eligible,
            max_build_ratio: 0.6,
            max_floor_area_ratio: 2.5,
            allowed_uses: BTreeSet::from([UseCategory::Residential, UseCategory::Commercial]),
            binding_constraints: Vec::new(),
            envelope: BuildingEnvelope {
                area_pyeong: 151.25,
                buildable_footprint_m2: 300.0,
                max_floor_area_m2: 1250.0,
            },
        },
        score: ScoreResult {
            composite: 98.5,
            grade: Grade::S,
            contributions: contributions([30.0, 20.0, 13.5, 15.0, 10.0, 10.0]),
        },
        price: PriceEstimate {
            point: 1_000_000_000.0,
            interval: PriceInterval {
                low: 900_000_000.0,
                high: 1_100_000_000.0,
            },
            price_per_m2: 2_000_000.0,
            confidence: ConfidenceLevel::High,
            method: EstimationMethod::Model,
            sample_size: 40,
            factors: vec![PriceFactor {
                name: "district_baseline".into(),
                effect: 1_000_000_000.0,
            }],
        },
        risk: RiskProfile {
            legal: 10.0,
            market: 15.0,
            development: 7.5,
            weighted: 10.75,
            tier: RiskTier::Low,
            factors: Vec::new(),
        },
        scenarios: vec![
            scenario(ScenarioKind::Conservative),
            scenario(ScenarioKind::Base),
            scenario(ScenarioKind::Optimistic),
        ],
        market_trend: None,
    }
}

fn inconsistent(parts: ReportParts) -> String {
    match parts.seal() {
        Err(EngineError::InconsistentReport { reason }) => reason,
        other => panic!("expected InconsistentReport, got {other:?}"),
    }
}

#[test]
fn consistent_parts_seal_with_verdict() {
    let report = parts().seal().expect("parts are consistent");
    assert_eq!(report.parcel_id(), "lot-7");
    assert_eq!(report.verdict(), Verdict::Recommended);
    assert_eq!(report.scenarios().len(), 3);
    assert!(!report.simulation_withheld());
}

#[test]
fn grade_disagreeing_with_score_is_rejected() {
    let mut p = parts();
    p.score.grade = Grade::A;
    assert!(inconsistent(p).contains("grade A"));
}

#[test]
fn composite_must_equal_contribution_sum() {
    let mut p = parts();
    p.score.contributions.insert(ScoreFactor::Terrain, 5.0);
    assert!(inconsistent(p).contains("sum of contributions"));
}

#[test]
fn missing_factor_is_rejected() {
    let mut p = parts();
    p.score.contributions.remove(&ScoreFactor::AreaBand);
    p.score.composite = 88.5;
    p.score.grade = Grade::A;
    assert!(inconsistent(p).contains("area_band"));
}

#[test]
fn ineligible_with_scenarios_is_rejected() {
    let mut p = parts();
    p.regulatory.eligibility = Eligibility::Ineligible;
    p.regulatory.allowed_uses.clear();
    p.risk.tier = RiskTier::Critical;
    assert!(inconsistent(p).contains("ineligible"));
}

#[test]
fn ineligible_below_high_risk_is_rejected() {
    let mut p = parts();
    p.regulatory.eligibility = Eligibility::Ineligible;
    p.regulatory.allowed_uses.clear();
    p.scenarios.clear();
    p.risk.tier = RiskTier::Medium;
    assert!(inconsistent(p).contains("ineligible parcel rated medium"));
}

#[test]
fn critical_risk_with_scenarios_is_rejected() {
    let mut p = parts();
    p.risk.legal = 95.0;
    p.risk.tier = RiskTier::Critical;
    assert!(inconsistent(p).contains("critical-risk"));
}

#[test]
fn heuristic_with_high_confidence_is_rejected() {
    let mut p = parts();
    p.price.method = EstimationMethod::Heuristic;
    assert!(inconsistent(p).contains("heuristic estimate reported high confidence"));
}

#[test]
fn point_outside_interval_is_rejected() {
    let mut p = parts();
    p.price.interval.high = 950_000_000.0;
    assert!(inconsistent(p).contains("outside its interval"));
}

#[test]
fn scenario_order_is_enforced() {
    let mut p = parts();
    p.scenarios.swap(0, 2);
    assert!(inconsistent(p).contains("order"));
}

#[test]
fn withheld_simulation_on_ineligible_parcel_seals() {
    let mut p = parts();
    p.regulatory.eligibility = Eligibility::Ineligible;
    p.regulatory.allowed_uses.clear();
    p.score.contributions = contributions([0.0, 20.0, 13.5, 15.0, 10.0, 10.0]);
    p.score.composite = 68.5;
    p.score.grade = Grade::B;
    p.risk.legal = 95.0;
    p.risk.tier = RiskTier::Critical;
    p.scenarios.clear();
    let report = p.seal().expect("withheld simulation is consistent");
    assert!(report.simulation_withheld());
    assert_eq!(report.verdict(), Verdict::NotRecommended);
}

#[test]
fn deserializing_a_tampered_report_fails() {
    let report = parts().seal().unwrap();
    let mut json = serde_json::to_value(&report).unwrap();
    json["score"]["grade"] = serde_json::json!("D");
    let err = serde_json::from_value::<FeasibilityReport>(json).unwrap_err();
    assert!(err.to_string().contains("Inconsistent report"));
}

#[test]
fn stored_report_roundtrips() {
    let report = parts().seal().unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: FeasibilityReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn sealed_report_validates_against_its_schema() {
    let report = parts().seal().unwrap();
    let schema = serde_json::to_value(schema_for!(FeasibilityReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should compile");
    let errors: Vec<String> = validator.iter_errors(&instance).map(|e| e.to_string()).collect();
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}
