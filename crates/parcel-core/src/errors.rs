//! Error taxonomy for the feasibility pipeline.
//!
//! Validation errors on the request abort the whole analysis. Data
//! shortfalls (`InsufficientComparableData`) never reach the caller of
//! `analyze`: the price predictor catches them and degrades to the heuristic
//! path. `InconsistentReport` always indicates a defect upstream of the
//! report synthesizer.

use thiserror::Error;

/// Errors raised by the feasibility engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The parcel references a zoning code absent from the registry.
    #[error("Unknown zoning code: {code}")]
    UnknownZoningCode { code: String },

    /// Overlay data is malformed, loosening, or mutually incompatible.
    #[error("Invalid overlay combination: {reason}")]
    InvalidOverlayCombination { reason: String },

    /// Not enough recent comparable sales for the statistical price model.
    #[error(
        "Insufficient comparable data for district '{district}': {available} usable sales, {required} required"
    )]
    InsufficientComparableData {
        district: String,
        available: usize,
        required: usize,
    },

    /// A component produced output that violates the report invariants.
    #[error("Inconsistent report: {reason}")]
    InconsistentReport { reason: String },

    /// A request field failed validation (parcel record or ROI assumptions).
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable error kind, used in batch output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownZoningCode { .. } => "unknown_zoning_code",
            Self::InvalidOverlayCombination { .. } => "invalid_overlay_combination",
            Self::InsufficientComparableData { .. } => "insufficient_comparable_data",
            Self::InconsistentReport { .. } => "inconsistent_report",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }

    /// Whether this error prevents a report from being produced.
    ///
    /// Only `InsufficientComparableData` is recoverable; it selects the
    /// heuristic price path instead of failing the analysis.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::InsufficientComparableData { .. })
    }
}
