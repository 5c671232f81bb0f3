//! # parcel-engine
//!
//! The parcel feasibility pipeline:
//!
//! regulatory → scoring → price → {trend, risk} → ROI → report
//!
//! Each stage is a pure function over the parcel, the comparable-sales
//! snapshot and the configuration. [`FeasibilityEngine`] wires them together
//! and is the entry point for callers. [`matching`] scores finished reports
//! against investor profiles.

mod engine;

pub mod matching;
pub mod pricing;
pub mod regulatory;
pub mod report;
pub mod risk;
pub mod roi;
pub mod scoring;
pub mod trend;

pub use engine::FeasibilityEngine;
