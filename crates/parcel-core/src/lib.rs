//! # parcel-core
//!
//! Core types, rule tables, and error types for the parcel feasibility engine.
//!
//! This crate provides the foundational types shared across all parcel crates:
//! - Input records (`ParcelRecord`, `ComparableSalesSet`, `RoiAssumptions`)
//! - Component results (regulatory, score, price, risk, ROI) and the sealed
//!   `FeasibilityReport`
//! - Closed enums with their fixed lookup tables (grade thresholds, verdicts)
//! - The cross-cutting `EngineError` taxonomy
//! - Area unit helpers and small descriptive statistics

pub mod entities;
pub mod enums;
pub mod errors;
pub mod stats;
pub mod units;

pub use errors::EngineError;
