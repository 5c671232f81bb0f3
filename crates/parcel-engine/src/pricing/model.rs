use std::collections::BTreeMap;

use parcel_config::{EngineConfig, PricingConfig};
use parcel_core::EngineError;
use parcel_core::entities::{ComparableSale, PriceEstimate, PriceFactor, PriceInterval};
use parcel_core::enums::{ConfidenceLevel, EstimationMethod};

use super::regression::{self, RidgeFit};
use super::{PriceEstimator, PriceRequest, rank_factors};

const FEATURES: [&str; 3] = ["ln_area", "zoning_tier", "road_access"];

/// Ridge regression of price per m² over recent district sales.
#[derive(Debug, Clone)]
pub struct ModelEstimator {
    config: PricingConfig,
    /// Zoning code → tier, for encoding comparable sales.
    tiers: BTreeMap<String, u8>,
}

impl ModelEstimator {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            config: config.pricing.clone(),
            tiers: config
                .zoning
                .iter()
                .map(|(code, rule)| (code.clone(), rule.tier))
                .collect(),
        }
    }

    /// Sales with a missing or unknown zoning code take the subject's tier;
    /// sales with unknown road access are treated as accessible.
    fn features(&self, sale: &ComparableSale, subject_tier: u8) -> [f64; 3] {
        let tier = sale
            .zoning_code
            .as_deref()
            .and_then(|code| self.tiers.get(code).copied())
            .unwrap_or(subject_tier);
        encode(sale.area_m2, tier, sale.road_access.unwrap_or(true))
    }

    fn insufficient(&self, request: &PriceRequest<'_>, available: usize) -> EngineError {
        EngineError::InsufficientComparableData {
            district: request.parcel.district.clone(),
            available,
            required: self.config.min_comparables,
        }
    }
}

fn encode(area_m2: f64, tier: u8, road_access: bool) -> [f64; 3] {
    [
        area_m2.ln(),
        f64::from(tier),
        if road_access { 1.0 } else { 0.0 },
    ]
}

impl PriceEstimator for ModelEstimator {
    fn method(&self) -> EstimationMethod {
        EstimationMethod::Model
    }

    fn estimate(&self, request: &PriceRequest<'_>) -> Result<PriceEstimate, EngineError> {
        let parcel = request.parcel;
        let sales = request
            .comparables
            .recent(&parcel.district, self.config.recency_window_days);
        let n = sales.len();
        if n < self.config.min_comparables {
            return Err(self.insufficient(request, n));
        }

        let rows: Vec<Vec<f64>> = sales
            .iter()
            .map(|sale| self.features(sale, request.zone_tier).to_vec())
            .collect();
        let prices: Vec<f64> = sales.iter().map(|sale| sale.price_per_m2).collect();

        let fit = regression::fit(&rows, &prices, self.config.ridge_lambda)
            .ok_or_else(|| self.insufficient(request, n))?;

        let subject = encode(parcel.area_m2, request.zone_tier, parcel.road_access);
        let price_per_m2 = fit.predict(&subject);
        if !price_per_m2.is_finite() || price_per_m2 <= 0.0 {
            tracing::debug!(parcel = %parcel.id, price_per_m2, "model prediction rejected");
            return Err(self.insufficient(request, n));
        }

        let point = price_per_m2 * parcel.area_m2;
        let half_width = self.config.interval_z * fit.residual_std_error * parcel.area_m2;
        let confidence = if n > self.config.high_confidence_comparables {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Medium
        };

        tracing::debug!(
            parcel = %parcel.id,
            samples = n,
            features = fit.active_features,
            price_per_m2,
            "model price estimate"
        );

        Ok(PriceEstimate {
            point,
            interval: PriceInterval {
                low: (point - half_width).max(0.0),
                high: point + half_width,
            },
            price_per_m2,
            confidence,
            method: EstimationMethod::Model,
            sample_size: n,
            factors: factors(&fit, &subject, parcel.area_m2),
        })
    }
}

fn factors(fit: &RidgeFit, subject: &[f64; 3], area_m2: f64) -> Vec<PriceFactor> {
    let mut factors = vec![PriceFactor {
        name: "district_baseline".into(),
        effect: fit.intercept * area_m2,
    }];
    factors.extend(
        FEATURES
            .iter()
            .enumerate()
            .filter(|(j, _)| fit.coefficients[*j].abs() > 0.0)
            .map(|(j, name)| PriceFactor {
                name: (*name).to_string(),
                effect: fit.effect(j, subject) * area_m2,
            }),
    );
    rank_factors(&mut factors);
    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use parcel_core::entities::{ComparableSalesSet, ParcelRecord};
    use parcel_core::enums::{Grade, TerrainClass};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn parcel() -> ParcelRecord {
        ParcelRecord {
            id: "lot-1".into(),
            area_m2: 500.0,
            zoning_code: "residential-general".into(),
            district: "mapo".into(),
            declared_price: None,
            road_access: true,
            shape_regularity: 1.0,
            terrain: TerrainClass::Flat,
            location: None,
            overlays: Default::default(),
            notes: None,
        }
    }

    /// `count` sales whose price rises with area, spread over the last year.
    fn sales(count: u32) -> ComparableSalesSet {
        let sales = (0..count)
            .map(|i| {
                let area = 300.0 + 25.0 * f64::from(i);
                ComparableSale {
                    district: "mapo".into(),
                    price_per_m2: 2_000_000.0 + 1_000.0 * area + 5_000.0 * f64::from(i % 4),
                    area_m2: area,
                    transaction_date: as_of() - Duration::days(i64::from(i) * 9),
                    zoning_code: Some("residential-general".into()),
                    road_access: Some(i % 5 != 0),
                }
            })
            .collect();
        ComparableSalesSet {
            as_of: as_of(),
            sales,
        }
    }

    fn run(comps: &ComparableSalesSet) -> Result<PriceEstimate, EngineError> {
        let estimator = ModelEstimator::from_config(&EngineConfig::default());
        let p = parcel();
        estimator.estimate(&PriceRequest {
            parcel: &p,
            comparables: comps,
            grade: Grade::S,
            zone_tier: 4,
        })
    }

    #[test]
    fn few_sales_are_insufficient() {
        let err = run(&sales(9)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientComparableData {
                district: "mapo".into(),
                available: 9,
                required: 10,
            }
        );
    }

    #[test]
    fn medium_confidence_up_to_threshold() {
        let estimate = run(&sales(30)).unwrap();
        assert_eq!(estimate.method, EstimationMethod::Model);
        assert_eq!(estimate.confidence, ConfidenceLevel::Medium);
        assert_eq!(estimate.sample_size, 30);
        assert!(estimate.interval.contains(estimate.point));
    }

    #[test]
    fn high_confidence_above_threshold() {
        let estimate = run(&sales(35)).unwrap();
        assert_eq!(estimate.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn prediction_tracks_district_prices() {
        let estimate = run(&sales(30)).unwrap();
        // subject area 500 m² sits inside the sample; expected ≈ 2.5M/m²
        assert!((estimate.price_per_m2 - 2_500_000.0).abs() < 150_000.0);
        assert_eq!(estimate.factors[0].name, "district_baseline");
        assert!(estimate.factors.iter().any(|f| f.name == "ln_area"));
    }

    #[test]
    fn stale_sales_are_ignored() {
        let mut comps = sales(12);
        for sale in &mut comps.sales {
            sale.transaction_date -= Duration::days(800);
        }
        assert!(run(&comps).is_err());
    }

    #[test]
    fn constant_tier_feature_is_dropped() {
        let estimate = run(&sales(20)).unwrap();
        assert!(estimate.factors.iter().all(|f| f.name != "zoning_tier"));
    }
}
