//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use parcel_config::EngineConfig;
use parcel_core::entities::{ComparableSale, ComparableSalesSet, ParcelRecord};
use parcel_core::enums::TerrainClass;
use parcel_engine::FeasibilityEngine;

pub fn engine() -> FeasibilityEngine {
    FeasibilityEngine::new(EngineConfig::default()).expect("default config is valid")
}

pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn stamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap()
}

/// 500 m² flat, regular, road-fronting lot in a general residential zone.
pub fn residential_parcel() -> ParcelRecord {
    ParcelRecord {
        id: "mapo-101".into(),
        area_m2: 500.0,
        zoning_code: "residential-general".into(),
        district: "mapo".into(),
        declared_price: None,
        road_access: true,
        shape_regularity: 0.9,
        terrain: TerrainClass::Flat,
        location: None,
        overlays: Default::default(),
        notes: Some("corner lot".into()),
    }
}

/// `count` recent sales in `mapo`, two to three a month, prices near 2.5M/m².
pub fn mapo_sales(count: u32) -> ComparableSalesSet {
    let sales = (0..count)
        .map(|i| ComparableSale {
            district: "mapo".into(),
            price_per_m2: 2_500_000.0 - 2_000.0 * f64::from(i) + 3_000.0 * f64::from(i % 5),
            area_m2: 300.0 + 20.0 * f64::from(i),
            transaction_date: as_of() - Duration::days(i64::from(i) * 12),
            zoning_code: Some(if i % 2 == 0 {
                "residential-general".into()
            } else {
                "residential-general-1".into()
            }),
            road_access: Some(i % 7 != 0),
        })
        .collect();
    ComparableSalesSet {
        as_of: as_of(),
        sales,
    }
}
