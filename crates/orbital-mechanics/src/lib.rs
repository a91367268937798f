//! Orbital Mechanics Library
//!
//! Two-line element parsing, two-body Kepler propagation, and the
//! Earth-rotation transforms needed to turn a catalog entry into a
//! sub-satellite point at a given UTC instant.
//!
//! The Earth is a sphere of radius [`EARTH_RADIUS_KM`] throughout; there is
//! no drag, J2 or other perturbation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod angles;
pub mod propagation;
pub mod tle;
pub mod transforms;

pub use propagation::{propagate, solve_kepler, KeplerSolution, OrbitState};
pub use tle::{
    filter_geostationary, parse_catalog, parse_tle, parse_tle_text, OrbitalElements, TleEntry,
    TleParseError,
};
pub use transforms::{eci_to_ecef, gmst_deg, gmst_rad, julian_date, sub_point};

/// Earth gravitational parameter (km³/s²)
pub const MU_EARTH_KM3_S2: f64 = 398_600.4418;

/// Spherical Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6378.137;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitalError {
    #[error("Invalid TLE: {0}")]
    InvalidTle(#[from] TleParseError),
    #[error("Propagation failed: {0}")]
    PropagationFailed(String),
}

pub type Result<T> = std::result::Result<T, OrbitalError>;

/// Sub-satellite point on the spherical Earth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Degrees, [-90, 90]
    pub latitude: f64,
    /// Degrees, (-180, 180]
    pub longitude: f64,
    pub altitude_km: f64,
}

impl OrbitalElements {
    /// Two-body state at `time`
    pub fn propagate(&self, time: DateTime<Utc>) -> Result<OrbitState> {
        propagation::propagate(self, time)
    }

    /// Point beneath the satellite at `time`
    pub fn ground_track(&self, time: DateTime<Utc>) -> Result<GeodeticPosition> {
        let state = self.propagate(time)?;
        let ecef = transforms::eci_to_ecef(&state.position_eci, transforms::gmst_rad(time));
        Ok(transforms::sub_point(&ecef))
    }
}
