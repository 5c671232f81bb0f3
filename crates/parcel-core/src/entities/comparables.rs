use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stats;

/// A single recorded land transaction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparableSale {
    pub district: String,
    pub price_per_m2: f64,
    pub area_m2: f64,
    pub transaction_date: NaiveDate,
    /// Zoning code of the sold parcel, when the data source reports it.
    #[serde(default)]
    pub zoning_code: Option<String>,
    #[serde(default)]
    pub road_access: Option<bool>,
}

impl ComparableSale {
    /// Sales with non-finite or non-positive figures are ignored everywhere.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.price_per_m2.is_finite()
            && self.price_per_m2 > 0.0
            && self.area_m2.is_finite()
            && self.area_m2 > 0.0
    }
}

/// Read-only snapshot of comparable sales, possibly spanning many districts.
///
/// `as_of` anchors the recency window so that analyses over the same
/// snapshot are reproducible regardless of wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparableSalesSet {
    pub as_of: NaiveDate,
    #[serde(default)]
    pub sales: Vec<ComparableSale>,
}

impl ComparableSalesSet {
    #[must_use]
    pub const fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            sales: Vec::new(),
        }
    }

    /// Usable sales in `district`, in snapshot order.
    pub fn in_district<'a>(
        &'a self,
        district: &str,
    ) -> impl Iterator<Item = &'a ComparableSale> {
        self.sales
            .iter()
            .filter(move |sale| sale.district == district && sale.is_usable())
    }

    /// Usable sales in `district` dated within `window_days` before `as_of`.
    /// Sales dated after `as_of` are excluded.
    ///
    /// A window reaching past the earliest representable date has no lower bound.
    #[must_use]
    pub fn recent(&self, district: &str, window_days: u32) -> Vec<&ComparableSale> {
        let earliest = self
            .as_of
            .checked_sub_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MIN);
        self.in_district(district)
            .filter(|sale| sale.transaction_date >= earliest && sale.transaction_date <= self.as_of)
            .collect()
    }

    /// Median price per m² across all usable district sales, regardless of date.
    #[must_use]
    pub fn median_price_per_m2(&self, district: &str) -> Option<f64> {
        let prices: Vec<f64> = self.in_district(district).map(|s| s.price_per_m2).collect();
        stats::median(&prices)
    }

    /// Coefficient of variation of recent price per m² (std / mean).
    ///
    /// `None` with fewer than two recent sales.
    #[must_use]
    pub fn volatility(&self, district: &str, window_days: u32) -> Option<f64> {
        let prices: Vec<f64> = self
            .recent(district, window_days)
            .iter()
            .map(|s| s.price_per_m2)
            .collect();
        stats::coefficient_of_variation(&prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(district: &str, price: f64, on: NaiveDate) -> ComparableSale {
        ComparableSale {
            district: district.into(),
            price_per_m2: price,
            area_m2: 400.0,
            transaction_date: on,
            zoning_code: None,
            road_access: None,
        }
    }

    fn set() -> ComparableSalesSet {
        ComparableSalesSet {
            as_of: date(2025, 6, 30),
            sales: vec![
                sale("a", 100.0, date(2025, 6, 1)),
                sale("a", 300.0, date(2025, 1, 15)),
                sale("a", 200.0, date(2020, 1, 1)),
                sale("a", 900.0, date(2025, 7, 15)),
                sale("a", -5.0, date(2025, 6, 1)),
                sale("b", 50.0, date(2025, 6, 1)),
            ],
        }
    }

    #[test]
    fn recent_filters_window_future_and_unusable() {
        let s = set();
        let recent = s.recent("a", 365);
        let prices: Vec<f64> = recent.iter().map(|s| s.price_per_m2).collect();
        assert_eq!(prices, vec![100.0, 300.0]);
    }

    #[test]
    fn window_past_the_calendar_keeps_all_history() {
        let s = set();
        let recent = s.recent("a", u32::MAX);
        let prices: Vec<f64> = recent.iter().map(|s| s.price_per_m2).collect();
        assert_eq!(prices, vec![100.0, 300.0, 200.0]);
    }

    #[test]
    fn median_uses_all_dates() {
        // usable district-a prices: 100, 300, 200, 900 -> median 250
        assert_eq!(set().median_price_per_m2("a"), Some(250.0));
        assert_eq!(set().median_price_per_m2("b"), Some(50.0));
        assert_eq!(set().median_price_per_m2("c"), None);
    }

    #[test]
    fn volatility_needs_two_sales() {
        let s = set();
        assert!(s.volatility("b", 365).is_none());
        let cv = s.volatility("a", 365).unwrap();
        // mean 200, population std 100
        assert!((cv - 0.5).abs() < 1e-12);
    }
}
