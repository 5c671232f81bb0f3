//! Closed enums and their fixed lookup tables.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Rule tables (grade thresholds, terrain points, verdicts) are plain data so
//! they can be unit-tested independently of the components that consult them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! display_via_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// UseCategory
// ---------------------------------------------------------------------------

/// Land-use category a zoning code may permit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UseCategory {
    Residential,
    Commercial,
    Industrial,
    Agricultural,
}

impl UseCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
            Self::Agricultural => "agricultural",
        }
    }
}

// ---------------------------------------------------------------------------
// OverlayFlag
// ---------------------------------------------------------------------------

/// Regulatory overlay marker attached to a parcel on top of its zoning code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OverlayFlag {
    ProtectedZone,
    FloodRisk,
    CulturalHeritage,
    MilitaryFacility,
    Landscape,
    HeightRestriction,
    /// Green-belt style development restriction zone.
    DevelopmentRestriction,
    /// Parcel falls inside an adopted district unit plan.
    DistrictUnitPlan,
}

impl OverlayFlag {
    pub const ALL: [Self; 8] = [
        Self::ProtectedZone,
        Self::FloodRisk,
        Self::CulturalHeritage,
        Self::MilitaryFacility,
        Self::Landscape,
        Self::HeightRestriction,
        Self::DevelopmentRestriction,
        Self::DistrictUnitPlan,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProtectedZone => "protected_zone",
            Self::FloodRisk => "flood_risk",
            Self::CulturalHeritage => "cultural_heritage",
            Self::MilitaryFacility => "military_facility",
            Self::Landscape => "landscape",
            Self::HeightRestriction => "height_restriction",
            Self::DevelopmentRestriction => "development_restriction",
            Self::DistrictUnitPlan => "district_unit_plan",
        }
    }

    /// Parse the `snake_case` form used in configuration keys.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == raw)
    }
}

// ---------------------------------------------------------------------------
// TerrainClass
// ---------------------------------------------------------------------------

/// Slope class of the parcel, flattest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    Flat,
    Gentle,
    Moderate,
    Steep,
}

impl TerrainClass {
    /// Development-potential points out of 15.
    #[must_use]
    pub const fn score_points(self) -> f64 {
        match self {
            Self::Flat => 15.0,
            Self::Gentle => 10.0,
            Self::Moderate => 5.0,
            Self::Steep => 0.0,
        }
    }

    /// Base development-risk points before the shape penalty.
    #[must_use]
    pub const fn risk_points(self) -> f64 {
        match self {
            Self::Flat => 5.0,
            Self::Gentle => 20.0,
            Self::Moderate => 45.0,
            Self::Steep => 75.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Gentle => "gentle",
            Self::Moderate => "moderate",
            Self::Steep => "steep",
        }
    }
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Build-eligibility tier produced by the regulatory analyzer.
///
/// Ordered from most to least permissive, so `max` picks the worse tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    ConditionallyEligible,
    Ineligible,
}

impl Eligibility {
    /// Development-potential points out of 30.
    #[must_use]
    pub const fn score_points(self) -> f64 {
        match self {
            Self::Eligible => 30.0,
            Self::ConditionallyEligible => 15.0,
            Self::Ineligible => 0.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::ConditionallyEligible => "conditionally_eligible",
            Self::Ineligible => "ineligible",
        }
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Development-potential letter grade, best first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

/// Minimum composite score for each grade above D. Scanned top-down; the
/// first threshold the score reaches wins.
pub const GRADE_THRESHOLDS: [(f64, Grade); 4] = [
    (90.0, Grade::S),
    (75.0, Grade::A),
    (60.0, Grade::B),
    (40.0, Grade::C),
];

impl Grade {
    pub const ALL: [Self; 5] = [Self::S, Self::A, Self::B, Self::C, Self::D];

    /// Grade implied by a composite score under [`GRADE_THRESHOLDS`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map_or(Self::D, |(_, grade)| *grade)
    }

    /// Inclusive lower bound of the grade's score bucket.
    #[must_use]
    pub fn min_score(self) -> f64 {
        GRADE_THRESHOLDS
            .iter()
            .find(|(_, grade)| *grade == self)
            .map_or(0.0, |(min, _)| *min)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

// ---------------------------------------------------------------------------
// ScoreFactor
// ---------------------------------------------------------------------------

/// Factors of the development-potential rubric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    RegulatoryEligibility,
    RoadAccess,
    ShapeRegularity,
    Terrain,
    AreaBand,
    OverlayBurden,
}

impl ScoreFactor {
    pub const ALL: [Self; 6] = [
        Self::RegulatoryEligibility,
        Self::RoadAccess,
        Self::ShapeRegularity,
        Self::Terrain,
        Self::AreaBand,
        Self::OverlayBurden,
    ];

    /// Rubric weight. The weights of all factors sum to 100.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::RegulatoryEligibility => 30.0,
            Self::RoadAccess => 20.0,
            Self::ShapeRegularity | Self::Terrain => 15.0,
            Self::AreaBand | Self::OverlayBurden => 10.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegulatoryEligibility => "regulatory_eligibility",
            Self::RoadAccess => "road_access",
            Self::ShapeRegularity => "shape_regularity",
            Self::Terrain => "terrain",
            Self::AreaBand => "area_band",
            Self::OverlayBurden => "overlay_burden",
        }
    }
}

// ---------------------------------------------------------------------------
// ConfidenceLevel / EstimationMethod
// ---------------------------------------------------------------------------

/// Confidence in a price estimate, driven by data sufficiency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Which price-estimation path produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMethod {
    /// Regression over recent comparable sales.
    Model,
    /// Median/default price scaled by grade.
    Heuristic,
}

impl EstimationMethod {
    /// Whether `confidence` is a legal pairing for this method.
    ///
    /// Heuristic estimates are always Low; model estimates never are.
    #[must_use]
    pub const fn admits(self, confidence: ConfidenceLevel) -> bool {
        match self {
            Self::Heuristic => matches!(confidence, ConfidenceLevel::Low),
            Self::Model => matches!(confidence, ConfidenceLevel::Medium | ConfidenceLevel::High),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Heuristic => "heuristic",
        }
    }
}

// ---------------------------------------------------------------------------
// RiskTier / RiskCategory
// ---------------------------------------------------------------------------

/// Overall risk tier, least risky first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// The three independently scored risk dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Legal,
    Market,
    Development,
}

impl RiskCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Market => "market",
            Self::Development => "development",
        }
    }
}

// ---------------------------------------------------------------------------
// ScenarioKind
// ---------------------------------------------------------------------------

/// ROI scenario, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Conservative,
    Base,
    Optimistic,
}

impl ScenarioKind {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Base, Self::Optimistic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Base => "base",
            Self::Optimistic => "optimistic",
        }
    }
}

// ---------------------------------------------------------------------------
// TrendDirection
// ---------------------------------------------------------------------------

/// Direction of the district's monthly price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Stable,
    Down,
}

impl TrendDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Stable => "stable",
            Self::Down => "down",
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Investment verdict summarising grade and risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Recommended,
    Consider,
    Caution,
    NotRecommended,
}

/// Verdict lookup indexed by `[RiskTier::index()][Grade::index()]`.
pub const VERDICT_TABLE: [[Verdict; 5]; 4] = {
    use Verdict::{Caution, Consider, NotRecommended, Recommended};
    [
        // S, A, B, C, D
        [Recommended, Recommended, Consider, Caution, NotRecommended], // Low
        [Recommended, Consider, Consider, Caution, NotRecommended],    // Medium
        [Caution, Caution, Caution, NotRecommended, NotRecommended],   // High
        [NotRecommended; 5],                                           // Critical
    ]
};

impl Verdict {
    /// Look up the verdict for a grade under a risk tier.
    #[must_use]
    pub const fn assess(grade: Grade, tier: RiskTier) -> Self {
        VERDICT_TABLE[tier.index()][grade.index()]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Consider => "consider",
            Self::Caution => "caution",
            Self::NotRecommended => "not_recommended",
        }
    }
}

// ---------------------------------------------------------------------------
// Investor matching
// ---------------------------------------------------------------------------

/// Why an investor is buying land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentPurpose {
    ShortTermGain,
    LongTermHold,
    Development,
}

impl InvestmentPurpose {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortTermGain => "short_term_gain",
            Self::LongTermHold => "long_term_hold",
            Self::Development => "development",
        }
    }
}

/// Investor appetite for risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Aggressive,
    Moderate,
    Conservative,
}

impl RiskTolerance {
    /// Match points deducted per severe risk dimension.
    #[must_use]
    pub const fn severe_risk_penalty(self) -> f64 {
        match self {
            Self::Aggressive => 2.0,
            Self::Moderate => 5.0,
            Self::Conservative => 10.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Moderate => "moderate",
            Self::Conservative => "conservative",
        }
    }
}

/// Strength of an investor/parcel match, best first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,
    Recommended,
    Possible,
    Unsuitable,
}

/// Minimum match score for each tier above Unsuitable.
pub const MATCH_THRESHOLDS: [(f64, MatchTier); 3] = [
    (80.0, MatchTier::Strong),
    (65.0, MatchTier::Recommended),
    (50.0, MatchTier::Possible),
];

impl MatchTier {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        MATCH_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map_or(Self::Unsuitable, |(_, tier)| *tier)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Recommended => "recommended",
            Self::Possible => "possible",
            Self::Unsuitable => "unsuitable",
        }
    }
}

display_via_as_str!(
    UseCategory,
    OverlayFlag,
    TerrainClass,
    Eligibility,
    Grade,
    ScoreFactor,
    ConfidenceLevel,
    EstimationMethod,
    RiskTier,
    RiskCategory,
    ScenarioKind,
    TrendDirection,
    Verdict,
    InvestmentPurpose,
    RiskTolerance,
    MatchTier,
);
