//! Domain generators for property-based testing

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use crate::fixtures::{tle_lines, ElementSet};

// ============================================================================
// Angle / Position Generators
// ============================================================================

/// Latitude (-90 to 90 deg)
pub fn latitude_deg() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

/// Latitude covered by UTM bands C..X, kept off the outer edges
pub fn utm_latitude_deg() -> impl Strategy<Value = f64> {
    -79.5f64..83.5
}

/// Longitude (-180 to 180 deg, open at the antimeridian)
pub fn longitude_deg() -> impl Strategy<Value = f64> {
    -179.999f64..179.999
}

/// Elevation threshold (0-90 deg)
pub fn elevation_threshold_deg() -> impl Strategy<Value = f64> {
    0.0f64..=90.0
}

/// Observer height above the sphere (Dead Sea shore to high mountain)
pub fn observer_height_m() -> impl Strategy<Value = f64> {
    -430.0f64..=8_848.0
}

/// Any angle in degrees, including large and negative multiples
pub fn any_angle_deg() -> impl Strategy<Value = f64> {
    -7_200.0f64..7_200.0
}

// ============================================================================
// Orbital Domain Generators
// ============================================================================

/// Eccentricity of a bound orbit the solver must handle (0 to 0.9)
pub fn eccentricity_elliptic() -> impl Strategy<Value = f64> {
    0.0f64..0.9
}

/// Mean anomaly in radians [0, 2π)
pub fn mean_anomaly_rad() -> impl Strategy<Value = f64> {
    0.0f64..std::f64::consts::TAU
}

/// Inclination in degrees (0-180)
pub fn inclination_deg() -> impl Strategy<Value = f64> {
    0.0f64..180.0
}

/// Angle written in a TLE field [0, 360)
pub fn tle_angle_deg() -> impl Strategy<Value = f64> {
    0.0f64..359.9999
}

/// Mean motion from geosynchronous to very low orbit (rev/day)
pub fn mean_motion_rev_day() -> impl Strategy<Value = f64> {
    0.9f64..16.5
}

/// Epoch between 2000 and 2050 on whole seconds
pub fn epoch() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_524_608_000i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
}

/// Propagation offset from epoch, up to ±10 days in seconds
pub fn epoch_offset_s() -> impl Strategy<Value = i64> {
    -864_000i64..=864_000
}

/// Complete element set in TLE units
pub fn element_set() -> impl Strategy<Value = ElementSet> {
    (
        inclination_deg(),
        tle_angle_deg(),
        0.0f64..0.25,
        tle_angle_deg(),
        tle_angle_deg(),
        mean_motion_rev_day(),
    )
        .prop_map(|(inc, raan, ecc, argp, ma, mm)| ElementSet {
            inclination_deg: inc,
            raan_deg: raan,
            eccentricity: ecc,
            arg_perigee_deg: argp,
            mean_anomaly_deg: ma,
            mean_motion_rev_day: mm,
        })
}

// ============================================================================
// Satellite ID Generators
// ============================================================================

/// NORAD ID (5-digit range)
pub fn norad_id() -> impl Strategy<Value = u32> {
    1u32..99_999u32
}

/// Generic satellite name
pub fn sat_name() -> impl Strategy<Value = String> {
    "[A-Z]{1,3}-[0-9]{1,4}".prop_map(|s| s.to_string())
}

/// (name, line1, line2) with valid columns and checksums
pub fn tle_entry() -> impl Strategy<Value = (String, String, String)> {
    (sat_name(), norad_id(), epoch(), element_set()).prop_map(|(name, id, epoch, elements)| {
        let (line1, line2) = tle_lines(id, epoch, &elements);
        (name, line1, line2)
    })
}

// ============================================================================
// MGRS Generators
// ============================================================================

/// Latitude band letter (C..X without I and O)
pub fn band_letter() -> impl Strategy<Value = char> {
    proptest::sample::select(b"CDEFGHJKLMNPQRSTUVWX".iter().map(|&b| b as char).collect::<Vec<_>>())
}

/// 100 km square letter (A..Z without I and O)
pub fn square_letter() -> impl Strategy<Value = char> {
    proptest::sample::select(
        b"ABCDEFGHJKLMNPQRSTUVWXYZ".iter().map(|&b| b as char).collect::<Vec<_>>(),
    )
}

/// Arbitrary short text that may or may not look like a grid reference
pub fn grid_noise() -> impl Strategy<Value = String> {
    "[0-9A-Za-z \\-]{0,16}"
}
