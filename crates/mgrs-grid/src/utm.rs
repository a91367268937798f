//! Inverse UTM projection (WGS-84, Redfearn series)

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, LatLon, MgrsError, Result};

/// WGS-84 semi-major axis in metres
pub const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
/// WGS-84 first eccentricity squared
pub const ECC_SQUARED: f64 = 0.00669438;
/// UTM central meridian scale factor
pub const SCALE_FACTOR: f64 = 0.9996;
/// False easting applied to every zone
pub const EASTING_OFFSET_M: f64 = 500_000.0;
/// False northing applied south of the equator
pub const NORTHING_OFFSET_M: f64 = 10_000_000.0;
/// Width of one UTM zone in degrees of longitude
pub const ZONE_WIDTH_DEG: f64 = 6.0;

/// A position in one UTM zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
}

/// Longitude of a zone's central meridian in degrees
pub fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * ZONE_WIDTH_DEG - 180.0 + ZONE_WIDTH_DEG / 2.0
}

impl UtmCoordinate {
    pub fn is_southern(&self) -> bool {
        self.band < 'N'
    }

    /// Same zone and band, shifted by `de`/`dn` metres
    pub fn offset(&self, de: f64, dn: f64) -> Self {
        Self {
            easting: self.easting + de,
            northing: self.northing + dn,
            ..*self
        }
    }

    /// Project back to geodetic latitude/longitude in degrees.
    ///
    /// Single footpoint-latitude expansion followed by the secant series for
    /// the longitude offset; no iteration.
    pub fn to_lat_lon(&self) -> Result<LatLon> {
        if !(1..=60).contains(&self.zone) {
            return Err(MgrsError::InvalidZone(self.zone));
        }

        let a = SEMI_MAJOR_AXIS_M;
        let e2 = ECC_SQUARED;
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
        let ecc_prime_sq = e2 / (1.0 - e2);

        let x = self.easting - EASTING_OFFSET_M;
        let mut y = self.northing;
        if self.is_southern() {
            y -= NORTHING_OFFSET_M;
        }

        // Meridional arc and rectifying latitude
        let m = y / SCALE_FACTOR;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2.powi(3) / 256.0));

        // Footpoint latitude
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let n1 = a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ecc_prime_sq * cos_phi1 * cos_phi1;
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = x / (n1 * SCALE_FACTOR);

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ecc_prime_sq)
                        * d.powi(4)
                        / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ecc_prime_sq
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lon = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ecc_prime_sq + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

        let point = LatLon {
            lat: lat.to_degrees(),
            lon: central_meridian(self.zone) + lon.to_degrees(),
        };

        if point.lat.is_finite() && point.lon.is_finite() {
            Ok(point)
        } else {
            Err(MgrsError::NonFinite)
        }
    }

    /// Geodetic box spanned by this corner and the corner `accuracy_m`
    /// metres to the north-east
    pub fn bounds(&self, accuracy_m: f64) -> Result<BoundingBox> {
        let south_west = self.to_lat_lon()?;
        let north_east = self.offset(accuracy_m, accuracy_m).to_lat_lon()?;
        Ok(BoundingBox {
            top: north_east.lat,
            right: north_east.lon,
            bottom: south_west.lat,
            left: south_west.lon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_meridian() {
        assert_eq!(central_meridian(1), -177.0);
        assert_eq!(central_meridian(31), 3.0);
        assert_eq!(central_meridian(43), 75.0);
        assert_eq!(central_meridian(60), 177.0);
    }

    #[test]
    fn test_false_origin_maps_to_equator_on_meridian() {
        let utm = UtmCoordinate { zone: 31, band: 'N', easting: 500_000.0, northing: 0.0 };
        let ll = utm.to_lat_lon().unwrap();
        assert!(ll.lat.abs() < 1e-9);
        assert!((ll.lon - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_southern_hemisphere_offset() {
        let north = UtmCoordinate { zone: 33, band: 'N', easting: 500_000.0, northing: 1_000_000.0 };
        let south = UtmCoordinate { zone: 33, band: 'M', easting: 500_000.0, northing: 9_000_000.0 };
        let n = north.to_lat_lon().unwrap();
        let s = south.to_lat_lon().unwrap();
        assert!((n.lat + s.lat).abs() < 1e-9, "{} vs {}", n.lat, s.lat);
        assert!(s.lat < 0.0);
    }

    #[test]
    fn test_known_point() {
        // 33UXP square centre used by proj4js/mgrs ("33UXP04" cell centre)
        let utm = UtmCoordinate { zone: 33, band: 'U', easting: 605_000.0, northing: 5_345_000.0 };
        let ll = utm.to_lat_lon().unwrap();
        assert!((ll.lat - 48.2495).abs() < 1e-3, "lat {}", ll.lat);
        assert!((ll.lon - 16.4144).abs() < 1e-3, "lon {}", ll.lon);
    }

    #[test]
    fn test_invalid_zone() {
        let utm = UtmCoordinate { zone: 61, band: 'N', easting: 500_000.0, northing: 0.0 };
        assert_eq!(utm.to_lat_lon(), Err(MgrsError::InvalidZone(61)));
        let utm = UtmCoordinate { zone: 0, ..utm };
        assert_eq!(utm.to_lat_lon(), Err(MgrsError::InvalidZone(0)));
    }

    #[test]
    fn test_bounds_orientation() {
        let utm = UtmCoordinate { zone: 43, band: 'U', easting: 300_000.0, northing: 5_500_000.0 };
        let b = utm.bounds(100_000.0).unwrap();
        assert!(b.top > b.bottom);
        assert!(b.right > b.left);
    }
}
