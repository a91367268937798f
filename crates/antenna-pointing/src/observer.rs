//! Ground observer
//!
//! Built only from a successful MGRS decode. The observer stands at the
//! centre of the referenced cell; altitude-only updates keep the decoded
//! position and grid text.

use mgrs_grid::{DecodeCache, GridPoint, GridReference};
use nalgebra::Vector3;
use orbital_mechanics::angles::normalize_degrees_signed;
use orbital_mechanics::transforms::geodetic_to_ecef;
use orbital_mechanics::GeodeticPosition;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PointingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Degrees, [-90, 90]
    pub latitude_deg: f64,
    /// Degrees, (-180, 180]
    pub longitude_deg: f64,
    /// Metres above the spherical Earth
    pub height_m: f64,
    /// Grid reference as entered
    pub mgrs_text: String,
    /// Normalized grid reference, e.g. `43UCR`
    pub mgrs_canonical: String,
}

impl Observer {
    pub fn from_mgrs(text: &str, height_m: f64) -> Result<Self> {
        check_height(height_m)?;
        let reference = GridReference::parse(text)?;
        let center = reference.center()?;
        Ok(Self::at_point(text, &reference, center, height_m))
    }

    /// Same as [`Observer::from_mgrs`], decoding through `cache`
    pub fn from_mgrs_cached(text: &str, height_m: f64, cache: &mut DecodeCache) -> Result<Self> {
        check_height(height_m)?;
        let reference = GridReference::parse(text)?;
        let center = cache.center(&reference)?;
        Ok(Self::at_point(text, &reference, center, height_m))
    }

    /// Copy with a new height; latitude, longitude and grid text are kept
    pub fn with_height(&self, height_m: f64) -> Result<Self> {
        check_height(height_m)?;
        Ok(Self {
            height_m,
            ..self.clone()
        })
    }

    pub fn position(&self) -> GeodeticPosition {
        GeodeticPosition {
            latitude: self.latitude_deg,
            longitude: self.longitude_deg,
            altitude_km: self.height_m / 1000.0,
        }
    }

    /// Earth-fixed position (km)
    pub fn ecef_km(&self) -> Vector3<f64> {
        geodetic_to_ecef(&self.position())
    }

    fn at_point(text: &str, reference: &GridReference, center: GridPoint, height_m: f64) -> Self {
        let observer = Self {
            latitude_deg: center.lat,
            longitude_deg: normalize_degrees_signed(center.lon),
            height_m,
            mgrs_text: text.to_string(),
            mgrs_canonical: reference.canonical(),
        };
        debug!(
            mgrs = %observer.mgrs_canonical,
            lat = observer.latitude_deg,
            lon = observer.longitude_deg,
            height_m,
            "Observer decoded"
        );
        observer
    }
}

fn check_height(height_m: f64) -> Result<()> {
    if height_m.is_finite() {
        Ok(())
    } else {
        Err(PointingError::InvalidHeight(height_m))
    }
}
