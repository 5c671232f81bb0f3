use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Grade, ScoreFactor};

/// Development-potential score with its per-factor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoreResult {
    /// Sum of contributions, clamped to `[0, 100]`.
    pub composite: f64,
    pub grade: Grade,
    /// Weighted contribution of every rubric factor.
    pub contributions: BTreeMap<ScoreFactor, f64>,
}

impl ScoreResult {
    #[must_use]
    pub fn contribution(&self, factor: ScoreFactor) -> f64 {
        self.contributions.get(&factor).copied().unwrap_or(0.0)
    }
}
