//! Topocentric look angles

use nalgebra::Vector3;
use orbital_mechanics::angles::normalize_degrees;
use serde::{Deserialize, Serialize};

use crate::Observer;

/// Closest elevation to -90 that is still inside (-90, 90]
fn above_nadir() -> f64 {
    f64::from_bits((-90.0f64).to_bits() - 1)
}

/// Antenna pointing solution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointingAngles {
    /// Clockwise from north, [0, 360)
    pub azimuth_deg: f64,
    /// Above the local horizontal, (-90, 90]
    pub elevation_deg: f64,
    pub range_km: f64,
}

impl PointingAngles {
    pub fn is_finite(&self) -> bool {
        self.azimuth_deg.is_finite() && self.elevation_deg.is_finite() && self.range_km.is_finite()
    }
}

/// Look angles from `observer` to an Earth-fixed position (km)
pub fn calculate_look_angles(observer: &Observer, target_ecef: &Vector3<f64>) -> PointingAngles {
    let delta = target_ecef - observer.ecef_km();
    let range_km = delta.norm();

    let (sin_lat, cos_lat) = observer.latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = observer.longitude_deg.to_radians().sin_cos();

    // East-North-Up rotation
    let east = -sin_lon * delta.x + cos_lon * delta.y;
    let north = -sin_lat * cos_lon * delta.x - sin_lat * sin_lon * delta.y + cos_lat * delta.z;
    let up = cos_lat * cos_lon * delta.x + cos_lat * sin_lon * delta.y + sin_lat * delta.z;

    let azimuth_deg = normalize_degrees(east.atan2(north).to_degrees());
    let mut elevation_deg = up.atan2(east.hypot(north)).to_degrees();
    // Straight down
    if elevation_deg <= -90.0 {
        elevation_deg = above_nadir();
    }

    PointingAngles {
        azimuth_deg,
        elevation_deg,
        range_km,
    }
}
