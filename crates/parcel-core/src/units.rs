//! Area unit conversions.

/// Pyeong per square metre (1 m² ≈ 0.3025 pyeong).
pub const PYEONG_PER_M2: f64 = 0.3025;

/// Convert square metres to pyeong, rounded to two decimals.
#[must_use]
pub fn m2_to_pyeong(area_m2: f64) -> f64 {
    round2(area_m2 * PYEONG_PER_M2)
}

/// Convert pyeong to square metres.
#[must_use]
pub fn pyeong_to_m2(area_pyeong: f64) -> f64 {
    area_pyeong / PYEONG_PER_M2
}

/// Round to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
