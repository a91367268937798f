//! Angle helpers
//!
//! Wrapping into the ranges the display and look-angle code expects.

use std::f64::consts::TAU;

/// Wrap into [0, 360)
pub fn normalize_degrees(value: f64) -> f64 {
    wrap(value, 360.0)
}

/// Wrap into (-180, 180]
pub fn normalize_degrees_signed(value: f64) -> f64 {
    let wrapped = normalize_degrees(value);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wrap into [0, 2π)
pub fn normalize_radians(value: f64) -> f64 {
    wrap(value, TAU)
}

/// Smallest separation between two headings, [0, 180]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Clamp into [min, max]; NaN maps to `min`
pub fn clamp_number(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.max(min).min(max)
    }
}

fn wrap(value: f64, period: f64) -> f64 {
    // rem_euclid rounds up to `period` for tiny negative inputs
    let wrapped = value.rem_euclid(period) + 0.0;
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}
