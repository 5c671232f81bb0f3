//! Price prediction: a statistical model over comparable sales with a
//! heuristic fallback.
//!
//! Both paths implement [`PriceEstimator`]. [`PricePredictor`] tries the
//! primary estimator and falls back only on `InsufficientComparableData`;
//! every other error propagates.

mod heuristic;
mod model;
mod regression;

pub use heuristic::HeuristicEstimator;
pub use model::ModelEstimator;

use parcel_config::EngineConfig;
use parcel_core::EngineError;
use parcel_core::entities::{ComparableSalesSet, ParcelRecord, PriceEstimate, PriceFactor};
use parcel_core::enums::{EstimationMethod, Grade};

/// Everything an estimator may consult for one parcel.
#[derive(Debug, Clone, Copy)]
pub struct PriceRequest<'a> {
    pub parcel: &'a ParcelRecord,
    pub comparables: &'a ComparableSalesSet,
    pub grade: Grade,
    /// Development-intensity tier of the parcel's zoning code.
    pub zone_tier: u8,
}

/// Inference-time contract for a price estimator.
pub trait PriceEstimator: Send + Sync {
    /// The method recorded on estimates produced by this estimator.
    fn method(&self) -> EstimationMethod;

    /// # Errors
    ///
    /// `InsufficientComparableData` when the estimator cannot produce a
    /// trustworthy figure from the available data.
    fn estimate(&self, request: &PriceRequest<'_>) -> Result<PriceEstimate, EngineError>;
}

/// Primary-then-fallback price prediction.
pub struct PricePredictor {
    primary: Box<dyn PriceEstimator>,
    fallback: Box<dyn PriceEstimator>,
}

impl std::fmt::Debug for PricePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricePredictor")
            .field("primary", &self.primary.method())
            .field("fallback", &self.fallback.method())
            .finish()
    }
}

impl PricePredictor {
    /// The standard model → heuristic chain configured from `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            Box::new(ModelEstimator::from_config(config)),
            Box::new(HeuristicEstimator::new(config.pricing.clone())),
        )
    }

    #[must_use]
    pub fn new(primary: Box<dyn PriceEstimator>, fallback: Box<dyn PriceEstimator>) -> Self {
        Self { primary, fallback }
    }

    /// # Errors
    ///
    /// Any fatal error from either estimator. Insufficient data on the
    /// fallback path is also returned, since nothing remains to degrade to.
    pub fn predict(&self, request: &PriceRequest<'_>) -> Result<PriceEstimate, EngineError> {
        match self.primary.estimate(request) {
            Ok(estimate) => Ok(estimate),
            Err(err) if !err.is_fatal() => {
                tracing::warn!(
                    parcel = %request.parcel.id,
                    district = %request.parcel.district,
                    reason = %err,
                    fallback = %self.fallback.method(),
                    "price model unavailable; falling back"
                );
                self.fallback.estimate(request)
            }
            Err(err) => Err(err),
        }
    }
}

/// Order factors by absolute effect, largest first, ties by name.
fn rank_factors(factors: &mut [PriceFactor]) {
    factors.sort_by(|a, b| {
        b.effect
            .abs()
            .total_cmp(&a.effect.abs())
            .then_with(|| a.name.cmp(&b.name))
    });
}
