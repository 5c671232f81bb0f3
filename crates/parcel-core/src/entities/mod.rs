//! Value objects flowing through the feasibility pipeline.
//!
//! Inputs (`ParcelRecord`, `ComparableSalesSet`, `RoiAssumptions`) are
//! validated at the engine boundary. Component outputs are plain values;
//! the final `FeasibilityReport` can only be obtained through
//! [`ReportParts::seal`], which enforces the cross-field invariants.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod comparables;
mod matching;
mod parcel;
mod price;
mod regulatory;
mod report;
mod risk;
mod roi;
mod score;
mod trend;

pub use comparables::{ComparableSale, ComparableSalesSet};
pub use matching::{InvestorProfile, MatchResult};
pub use parcel::{Coordinates, ParcelRecord};
pub use price::{PriceEstimate, PriceFactor, PriceInterval};
pub use regulatory::{BuildingEnvelope, OverlayConstraint, RegulatoryResult};
pub use report::{FeasibilityReport, ReportParts};
pub use risk::{RiskFactor, RiskProfile};
pub use roi::{RoiAssumptions, RoiScenario, ScenarioAssumption};
pub use score::ScoreResult;
pub use trend::MarketTrend;
