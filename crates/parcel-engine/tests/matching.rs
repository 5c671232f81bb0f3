mod common;

use common::{as_of, engine, mapo_sales, residential_parcel, stamp};
use parcel_core::entities::{
    ComparableSalesSet, FeasibilityReport, InvestorProfile, ParcelRecord, RoiAssumptions,
};
use parcel_core::enums::{InvestmentPurpose, MatchTier, OverlayFlag, RiskTolerance, TerrainClass};
use parcel_engine::matching::{match_report, rank};
use pretty_assertions::assert_eq;

fn report(parcel: &ParcelRecord) -> FeasibilityReport {
    engine()
        .analyze_at(parcel, &mapo_sales(40), &RoiAssumptions::default(), stamp())
        .unwrap()
}

fn profile(purpose: InvestmentPurpose, risk_tolerance: RiskTolerance) -> InvestorProfile {
    InvestorProfile {
        name: "kim".into(),
        budget_min: 500_000_000.0,
        budget_max: 2_000_000_000.0,
        purpose,
        risk_tolerance,
    }
}

#[test]
fn strong_match_for_developer_within_budget() {
    let result = match_report(
        &report(&residential_parcel()),
        &profile(InvestmentPurpose::Development, RiskTolerance::Moderate),
    );
    // 30 budget + 25 × 0.985 + 25 purpose + 20 risk
    assert!((result.score - 99.63).abs() < 0.01);
    assert_eq!(result.tier, MatchTier::Strong);
    assert_eq!(result.reasons[0], "priced within budget");
}

#[test]
fn over_budget_lowers_the_score() {
    let tight = InvestorProfile {
        budget_max: 600_000_000.0,
        budget_min: 100_000_000.0,
        ..profile(InvestmentPurpose::LongTermHold, RiskTolerance::Moderate)
    };
    let result = match_report(&report(&residential_parcel()), &tight);
    assert!(result.reasons[0].starts_with("priced above budget"));
    assert!(result.score < 80.0);
}

#[test]
fn severe_risks_penalize_by_tolerance() {
    let steep = ParcelRecord {
        terrain: TerrainClass::Steep,
        ..residential_parcel()
    };
    let r = report(&steep);
    let aggressive = match_report(
        &r,
        &profile(InvestmentPurpose::LongTermHold, RiskTolerance::Aggressive),
    );
    let conservative = match_report(
        &r,
        &profile(InvestmentPurpose::LongTermHold, RiskTolerance::Conservative),
    );
    assert!((aggressive.score - conservative.score - 8.0).abs() < 1e-9);
    assert!(
        conservative
            .reasons
            .iter()
            .any(|reason| reason == "severe development risk")
    );
}

#[test]
fn ranking_orders_by_score_then_id() {
    let good = report(&residential_parcel());
    let twin = report(&ParcelRecord {
        id: "mapo-100".into(),
        ..residential_parcel()
    });
    let restricted = engine()
        .analyze_at(
            &ParcelRecord {
                id: "mapo-200".into(),
                ..residential_parcel().with_overlay(OverlayFlag::CulturalHeritage)
            },
            &ComparableSalesSet::empty(as_of()),
            &RoiAssumptions::default(),
            stamp(),
        )
        .unwrap();

    let ranked = rank(
        &[restricted, good, twin],
        &profile(InvestmentPurpose::ShortTermGain, RiskTolerance::Moderate),
    )
    .unwrap();
    let ids: Vec<&str> = ranked.iter().map(|m| m.parcel_id.as_str()).collect();
    assert_eq!(ids, ["mapo-100", "mapo-101", "mapo-200"]);
}

#[test]
fn malformed_budget_is_rejected() {
    let broken = InvestorProfile {
        budget_min: 10.0,
        budget_max: 5.0,
        ..profile(InvestmentPurpose::Development, RiskTolerance::Moderate)
    };
    assert!(rank(&[], &broken).is_err());
}
