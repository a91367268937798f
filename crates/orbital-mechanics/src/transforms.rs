//! Time and frame transforms
//!
//! GMST from the IAU 1982 polynomial, rotation about the pole from ECI to
//! ECEF, and spherical sub-point / station geometry.

use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};

use crate::angles::{normalize_degrees, normalize_degrees_signed};
use crate::{GeodeticPosition, EARTH_RADIUS_KM, SECONDS_PER_DAY};

/// Julian date of 1970-01-01T00:00:00Z
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0
pub const J2000_JD: f64 = 2_451_545.0;

pub fn julian_date(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / (SECONDS_PER_DAY * 1e6) + UNIX_EPOCH_JD
}

/// Greenwich mean sidereal time in degrees, [0, 360)
pub fn gmst_deg(time: DateTime<Utc>) -> f64 {
    let d = julian_date(time) - J2000_JD;
    let t = d / 36_525.0;
    normalize_degrees(280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0)
}

pub fn gmst_rad(time: DateTime<Utc>) -> f64 {
    gmst_deg(time).to_radians()
}

/// Rotate an inertial vector into the Earth-fixed frame
pub fn eci_to_ecef(eci: &Vector3<f64>, gmst_rad: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst_rad) * eci
}

/// Spherical latitude, longitude and height of an Earth-fixed position
pub fn sub_point(ecef: &Vector3<f64>) -> GeodeticPosition {
    let horizontal = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
    GeodeticPosition {
        latitude: ecef.z.atan2(horizontal).to_degrees(),
        longitude: normalize_degrees_signed(ecef.y.atan2(ecef.x).to_degrees()),
        altitude_km: ecef.norm() - EARTH_RADIUS_KM,
    }
}

/// Earth-fixed position of a point on the spherical Earth
pub fn geodetic_to_ecef(pos: &GeodeticPosition) -> Vector3<f64> {
    let lat = pos.latitude.to_radians();
    let lon = pos.longitude.to_radians();
    let r = EARTH_RADIUS_KM + pos.altitude_km;
    Vector3::new(r * lat.cos() * lon.cos(), r * lat.cos() * lon.sin(), r * lat.sin())
}
