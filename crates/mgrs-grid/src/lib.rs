//! MGRS Grid Library
//!
//! Decodes Military Grid Reference System designators (grid zone, 100 km
//! square, optional sub-square digits) into WGS-84 latitude/longitude using
//! the inverse UTM series.
//!
//! ```text
//! "43UCR"  ->  zone 43, band U, column C, row R
//!          ->  UTM E 300 000 m, N 5 500 000 m
//!          ->  49.62°N, 72.23°E  (south-west corner)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod cache;
pub mod letters;
pub mod reference;
pub mod utm;

#[cfg(test)]
mod forward;

pub use cache::{CacheStats, DecodeCache};
pub use reference::{normalize, GridReference};
pub use utm::UtmCoordinate;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MgrsError {
    #[error("Empty grid reference")]
    Empty,
    #[error("Malformed grid reference: {0}")]
    Malformed(String),
    #[error("UTM zone {0} outside 1-60")]
    InvalidZone(u8),
    #[error("Unknown latitude band letter: {0}")]
    UnknownBand(char),
    #[error("Letter {0} is not used in 100 km square designators")]
    ExcludedLetter(char),
    #[error("Row letter {0} is beyond V")]
    RowOutOfRange(char),
    #[error("Letter {0} wrapped the 100 km alphabet twice")]
    LetterWrap(char),
    #[error("Sub-square digits must come in easting/northing pairs, got {0}")]
    OddPrecision(usize),
    #[error("At most 10 sub-square digits are supported, got {0}")]
    PrecisionTooFine(usize),
    #[error("Projection produced a non-finite coordinate")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, MgrsError>;

/// Geodetic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// A decoded point and the size of the grid cell it stands for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
    pub accuracy_m: f64,
}

impl GridPoint {
    pub fn new(ll: LatLon, accuracy_m: f64) -> Self {
        Self {
            lat: ll.lat,
            lon: ll.lon,
            accuracy_m,
        }
    }
}

/// Geodetic extent of a grid cell (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.bottom..=self.top).contains(&lat) && (self.left..=self.right).contains(&lon)
    }

    pub fn center(&self) -> LatLon {
        LatLon {
            lat: (self.top + self.bottom) / 2.0,
            lon: (self.left + self.right) / 2.0,
        }
    }
}

/// What shape of answer `decode` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Bounding box when sub-square digits are present, point otherwise
    #[default]
    Auto,
    /// Always the south-west corner with its accuracy
    Point,
    /// Always the bounding box of the resolved cell
    Cell,
}

/// Decoded grid reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Point(GridPoint),
    Cell(BoundingBox),
}

/// Decode an MGRS designator.
///
/// Input is normalized first (case, spaces and punctuation are ignored).
pub fn decode(text: &str, resolution: Resolution) -> Result<Location> {
    let reference = GridReference::parse(text).map_err(|e| {
        debug!(input = text, error = %e, "MGRS parse failed");
        e
    })?;

    let cell = match resolution {
        Resolution::Auto => reference.has_digits(),
        Resolution::Point => false,
        Resolution::Cell => true,
    };

    let location = if cell {
        reference.bounds().map(Location::Cell)
    } else {
        reference.south_west().map(Location::Point)
    };

    location.map_err(|e| {
        debug!(mgrs = %reference, error = %e, "MGRS decode failed");
        e
    })
}

/// South-west corner of the referenced cell
pub fn to_lat_lon(text: &str) -> Result<GridPoint> {
    GridReference::parse(text)?.south_west()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::lat_lon_to_utm;
    use fuzz_harness::prelude::*;

    #[test]
    fn test_43ucr_inside_zone_and_band() {
        let point = to_lat_lon("43UCR").unwrap();
        assert!((72.0..=78.0).contains(&point.lon), "lon {}", point.lon);
        assert!((48.0..=56.0).contains(&point.lat), "lat {}", point.lat);
        assert_eq!(point.accuracy_m, 100_000.0);

        let center = GridReference::parse("43UCR").unwrap().center().unwrap();
        assert!((72.0..=78.0).contains(&center.lon));
        assert!((48.0..=56.0).contains(&center.lat));
        assert!(center.lat > point.lat && center.lon > point.lon);
    }

    #[test]
    fn test_auto_resolution() {
        assert!(matches!(decode("43UCR", Resolution::Auto), Ok(Location::Point(_))));
        assert!(matches!(decode("43UCR1234", Resolution::Auto), Ok(Location::Cell(_))));
        assert!(matches!(decode("43UCR", Resolution::Cell), Ok(Location::Cell(_))));
        assert!(matches!(decode("43UCR1234", Resolution::Point), Ok(Location::Point(_))));
    }

    #[test]
    fn test_cell_matches_accuracy() {
        let Location::Cell(b) = decode("33UXP04", Resolution::Auto).unwrap() else {
            panic!("expected a cell");
        };
        // 10 km is roughly 0.09° of latitude
        assert!((b.top - b.bottom - 0.09).abs() < 0.01, "{b:?}");
        assert!(b.contains(b.center().lat, b.center().lon));
    }

    #[test]
    fn test_failures_are_typed() {
        assert_eq!(decode("", Resolution::Auto), Err(MgrsError::Empty));
        assert_eq!(decode("43ZCR", Resolution::Auto), Err(MgrsError::UnknownBand('Z')));
        assert_eq!(decode("43UCX", Resolution::Auto), Err(MgrsError::RowOutOfRange('X')));
    }

    #[test]
    fn test_southern_square() {
        // Sydney area
        let point = GridReference::parse("56HLH").unwrap().center().unwrap();
        assert!(point.lat < -32.0 && point.lat > -40.0, "lat {}", point.lat);
        assert!(point.lon > 150.0 && point.lon < 156.0, "lon {}", point.lon);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn fuzz_square_letters_round_trip(lat in utm_latitude_deg(), lon in longitude_deg()) {
            let fwd = lat_lon_to_utm(lat, lon);
            let reference = GridReference::parse(&fwd.square_id()).unwrap();
            let origin = reference.origin().unwrap();

            prop_assert!(origin.easting <= fwd.easting && fwd.easting < origin.easting + 100_000.0,
                "easting {} not in square at {}", fwd.easting, origin.easting);
            prop_assert!(origin.northing <= fwd.northing && fwd.northing < origin.northing + 100_000.0,
                "northing {} not in square at {}", fwd.northing, origin.northing);
        }

        #[test]
        fn fuzz_inverse_projection_round_trip(lat in utm_latitude_deg(), lon in longitude_deg()) {
            let fwd = lat_lon_to_utm(lat, lon);
            let utm = UtmCoordinate { zone: fwd.zone, band: fwd.band, easting: fwd.easting, northing: fwd.northing };
            let back = utm.to_lat_lon().unwrap();
            prop_assert!((back.lat - lat).abs() < 1e-6, "lat {} -> {}", lat, back.lat);
            prop_assert!((back.lon - lon).abs() < 1e-6, "lon {} -> {}", lon, back.lon);
        }

        #[test]
        fn fuzz_decode_reencode_same_square(lat in utm_latitude_deg(), lon in longitude_deg()) {
            let square = lat_lon_to_utm(lat, lon).square_id();
            let center = GridReference::parse(&square).unwrap().center().unwrap();
            let again = lat_lon_to_utm(center.lat, center.lon);

            // Squares clipped by a zone or band edge can have their centre
            // outside the zone/band; the grid itself is ambiguous there.
            let original = lat_lon_to_utm(lat, lon);
            prop_assume!(again.zone == original.zone && again.band == original.band);
            prop_assert_eq!(again.square_id(), square);
        }

        #[test]
        fn fuzz_excluded_letters_never_decode(
            zone in 1u8..=60,
            band in band_letter(),
            other in square_letter(),
            excluded in prop_oneof![Just('I'), Just('O')],
            excluded_first in any::<bool>(),
        ) {
            let square = if excluded_first {
                format!("{excluded}{other}")
            } else {
                format!("{other}{excluded}")
            };
            let text = format!("{zone}{band}{square}");
            prop_assert!(decode(&text, Resolution::Auto).is_err());
            prop_assert!(decode(&text.to_lowercase(), Resolution::Cell).is_err());
        }
    }
}
