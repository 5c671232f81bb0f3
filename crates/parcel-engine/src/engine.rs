use chrono::{DateTime, Utc};
use parcel_config::{ConfigError, EngineConfig};
use parcel_core::EngineError;
use parcel_core::entities::{ComparableSalesSet, FeasibilityReport, ParcelRecord, RoiAssumptions};

use crate::pricing::{PricePredictor, PriceRequest};
use crate::report::{self, Components};
use crate::risk::{self, MarketSignals};
use crate::{regulatory, roi, scoring, trend};

/// The feasibility pipeline bound to one configuration.
///
/// Holds only immutable reference data, so one engine can serve any number
/// of threads concurrently.
#[derive(Debug)]
pub struct FeasibilityEngine {
    config: EngineConfig,
    predictor: PricePredictor,
}

impl FeasibilityEngine {
    /// Build an engine with the standard model → heuristic price chain.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the configuration is malformed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let predictor = PricePredictor::from_config(&config);
        Ok(Self { config, predictor })
    }

    /// Build an engine with a caller-supplied price predictor.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_predictor(
        config: EngineConfig,
        predictor: PricePredictor,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, predictor })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a parcel, stamping the report with the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::analyze_at`].
    pub fn analyze(
        &self,
        parcel: &ParcelRecord,
        comparables: &ComparableSalesSet,
        assumptions: &RoiAssumptions,
    ) -> Result<FeasibilityReport, EngineError> {
        self.analyze_at(parcel, comparables, assumptions, Utc::now())
    }

    /// Analyze a parcel with a caller-controlled timestamp.
    ///
    /// The result depends only on the arguments and the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a malformed parcel or malformed assumptions.
    /// - `UnknownZoningCode` / `InvalidOverlayCombination` from regulation.
    /// - `InconsistentReport` if the components disagree (a defect).
    pub fn analyze_at(
        &self,
        parcel: &ParcelRecord,
        comparables: &ComparableSalesSet,
        assumptions: &RoiAssumptions,
        generated_at: DateTime<Utc>,
    ) -> Result<FeasibilityReport, EngineError> {
        parcel.validate()?;
        assumptions.validate()?;

        let regulatory = regulatory::analyze(parcel, &self.config)?;
        let zone_tier = self
            .config
            .zone(&parcel.zoning_code)
            .map_or(1, |zone| zone.tier);
        let score = scoring::score(parcel, &regulatory, &self.config.scoring);

        let price = self.predictor.predict(&PriceRequest {
            parcel,
            comparables,
            grade: score.grade,
            zone_tier,
        })?;

        let window = self.config.pricing.recency_window_days;
        let market_trend = trend::analyze(comparables, &parcel.district, window);
        let signals = MarketSignals {
            volatility: comparables.volatility(&parcel.district, window),
            trend: market_trend.as_ref(),
        };
        let risk = risk::assess(parcel, &regulatory, &price, signals, &self.config.risk);

        let scenarios = if roi::should_simulate(&regulatory, &risk) {
            roi::simulate(&price, assumptions)?
        } else {
            tracing::debug!(
                parcel = %parcel.id,
                eligibility = %regulatory.eligibility,
                tier = %risk.tier,
                "return simulation withheld"
            );
            Vec::new()
        };

        let report = report::synthesize(
            &parcel.id,
            generated_at,
            Components {
                regulatory,
                score,
                price,
                risk,
                scenarios,
                market_trend,
            },
        )?;

        tracing::info!(
            parcel = %report.parcel_id(),
            grade = %report.score().grade,
            method = %report.price().method,
            tier = %report.risk().tier,
            verdict = %report.verdict(),
            "analysis complete"
        );
        Ok(report)
    }
}
