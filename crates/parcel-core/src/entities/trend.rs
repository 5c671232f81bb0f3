use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrendDirection;

/// Monthly price trend for a district.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MarketTrend {
    /// Number of calendar months with at least one sale.
    pub months: usize,
    pub direction: TrendDirection,
    /// Least-squares slope of the monthly average price per m², per month.
    pub slope_per_month: f64,
    /// Change between the last two monthly averages, in percent.
    ///
    /// `None` when those months are not consecutive calendar months.
    #[serde(default)]
    pub monthly_change_pct: Option<f64>,
    /// Std / mean of the monthly averages.
    pub volatility: f64,
    pub latest_price_per_m2: f64,
}
