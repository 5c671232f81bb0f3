use parcel_config::PricingConfig;
use parcel_core::EngineError;
use parcel_core::entities::{PriceEstimate, PriceFactor, PriceInterval};
use parcel_core::enums::{ConfidenceLevel, EstimationMethod};

use super::{PriceEstimator, PriceRequest, rank_factors};

/// District median (or configured default) × area × grade multiplier.
#[derive(Debug, Clone)]
pub struct HeuristicEstimator {
    config: PricingConfig,
}

impl HeuristicEstimator {
    #[must_use]
    pub const fn new(config: PricingConfig) -> Self {
        Self { config }
    }
}

impl PriceEstimator for HeuristicEstimator {
    fn method(&self) -> EstimationMethod {
        EstimationMethod::Heuristic
    }

    fn estimate(&self, request: &PriceRequest<'_>) -> Result<PriceEstimate, EngineError> {
        let parcel = request.parcel;
        let sample_size = request.comparables.in_district(&parcel.district).count();
        let (base_name, base_per_m2) = request
            .comparables
            .median_price_per_m2(&parcel.district)
            .map_or(("default_price", self.config.default_price_per_m2), |median| {
                ("district_median", median)
            });

        let multiplier = self.config.grade_multipliers.for_grade(request.grade);
        let price_per_m2 = base_per_m2 * multiplier;
        let point = price_per_m2 * parcel.area_m2;
        let band = self.config.heuristic_band;

        let base_value = base_per_m2 * parcel.area_m2;
        let mut factors = vec![
            PriceFactor {
                name: base_name.to_string(),
                effect: base_value,
            },
            PriceFactor {
                name: format!("grade_{}", request.grade.as_str().to_lowercase()),
                effect: point - base_value,
            },
        ];
        rank_factors(&mut factors);

        tracing::debug!(
            parcel = %parcel.id,
            base = base_name,
            price_per_m2,
            "heuristic price estimate"
        );

        Ok(PriceEstimate {
            point,
            interval: PriceInterval {
                low: point * (1.0 - band),
                high: point * (1.0 + band),
            },
            price_per_m2,
            confidence: ConfidenceLevel::Low,
            method: EstimationMethod::Heuristic,
            sample_size,
            factors,
        })
    }
}
