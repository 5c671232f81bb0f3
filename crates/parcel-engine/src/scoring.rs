//! Development potential scorer.
//!
//! Six weighted factors (weights sum to 100) combine into a composite score
//! and a letter grade. The full breakdown is always retained.

use std::collections::BTreeMap;

use parcel_config::ScoringConfig;
use parcel_core::entities::{ParcelRecord, RegulatoryResult, ScoreResult};
use parcel_core::enums::{Grade, ScoreFactor};

/// Points lost per binding overlay constraint.
const OVERLAY_BURDEN_STEP: f64 = 2.0;

#[must_use]
pub fn score(
    parcel: &ParcelRecord,
    regulatory: &RegulatoryResult,
    config: &ScoringConfig,
) -> ScoreResult {
    let contributions: BTreeMap<ScoreFactor, f64> = ScoreFactor::ALL
        .into_iter()
        .map(|factor| (factor, contribution(factor, parcel, regulatory, config)))
        .collect();

    let composite = contributions.values().sum::<f64>().clamp(0.0, 100.0);

    ScoreResult {
        composite,
        grade: Grade::from_score(composite),
        contributions,
    }
}

#[allow(clippy::cast_precision_loss)]
fn contribution(
    factor: ScoreFactor,
    parcel: &ParcelRecord,
    regulatory: &RegulatoryResult,
    config: &ScoringConfig,
) -> f64 {
    let weight = factor.weight();
    match factor {
        ScoreFactor::RegulatoryEligibility => regulatory.eligibility.score_points(),
        ScoreFactor::RoadAccess => {
            if parcel.road_access {
                weight
            } else {
                0.0
            }
        }
        ScoreFactor::ShapeRegularity => weight * parcel.shape_regularity,
        ScoreFactor::Terrain => parcel.terrain.score_points(),
        ScoreFactor::AreaBand => {
            if config.in_efficient_band(parcel.area_m2) {
                weight
            } else {
                0.0
            }
        }
        ScoreFactor::OverlayBurden => {
            (weight - OVERLAY_BURDEN_STEP * regulatory.binding_count() as f64).max(0.0)
        }
    }
}
