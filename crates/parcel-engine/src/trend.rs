//! Market trend analyzer over a district's monthly average prices.

use std::collections::BTreeMap;

use chrono::Datelike;
use parcel_core::entities::{ComparableSalesSet, MarketTrend};
use parcel_core::enums::TrendDirection;
use parcel_core::stats;

/// Monthly slope (as a fraction of the mean level) beyond which a market is
/// considered moving.
const STABLE_BAND: f64 = 0.005;

/// Summarize the district's recent price movement.
///
/// Returns `None` when fewer than two calendar months carry sales.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn analyze(
    comparables: &ComparableSalesSet,
    district: &str,
    window_days: u32,
) -> Option<MarketTrend> {
    let mut buckets: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for sale in comparables.recent(district, window_days) {
        let date = sale.transaction_date;
        let key = date.year() * 12 + date.month0() as i32;
        buckets.entry(key).or_default().push(sale.price_per_m2);
    }
    if buckets.len() < 2 {
        return None;
    }

    let first = *buckets.keys().next()?;
    let points: Vec<(f64, f64)> = buckets
        .iter()
        .filter_map(|(month, prices)| Some((f64::from(month - first), stats::mean(prices)?)))
        .collect();
    let averages: Vec<f64> = points.iter().map(|(_, avg)| *avg).collect();

    let slope = least_squares_slope(&points)?;
    let level = stats::mean(&averages)?;
    let direction = if slope > STABLE_BAND * level {
        TrendDirection::Up
    } else if slope < -STABLE_BAND * level {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let latest = *averages.last()?;
    let (last_month, previous) = points[points.len() - 2];
    let adjacent = (points[points.len() - 1].0 - last_month - 1.0).abs() < f64::EPSILON;
    let monthly_change_pct =
        (adjacent && previous > 0.0).then(|| (latest - previous) / previous * 100.0);

    let trend = MarketTrend {
        months: averages.len(),
        direction,
        slope_per_month: slope,
        monthly_change_pct,
        volatility: stats::coefficient_of_variation(&averages).unwrap_or(0.0),
        latest_price_per_m2: latest,
    };
    tracing::debug!(district, months = trend.months, direction = %trend.direction, "market trend");
    Some(trend)
}

#[allow(clippy::cast_precision_loss)]
fn least_squares_slope(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|(x, _)| (x - x_mean).powi(2)).sum();
    if sxx <= 0.0 {
        return None;
    }
    let sxy: f64 = points
        .iter()
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    Some(sxy / sxx)
}
