//! Antenna Pointing
//!
//! Turns an MGRS observer position and a TLE catalog into the list of
//! satellites above the elevation mask, with azimuth, elevation, range and
//! sub-satellite point for each, and keeps track of which one the antenna
//! is assigned to across refreshes.
//!
//! Topocentric geometry uses the spherical Earth of `orbital-mechanics`;
//! only the MGRS decode itself is ellipsoidal.

use mgrs_grid::MgrsError;
use thiserror::Error;

pub mod config;
pub mod look;
pub mod observer;
pub mod session;
pub mod visibility;

pub use config::PointingConfig;
pub use look::{calculate_look_angles, PointingAngles};
pub use observer::Observer;
pub use session::PointingSession;
pub use visibility::{compute_visibility, evaluate, filter_visible, select_satellite, VisibilityRecord};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointingError {
    #[error("MGRS decode failed: {0}")]
    Decode(#[from] MgrsError),
    #[error("Observer height must be finite, got {0}")]
    InvalidHeight(f64),
}

pub type Result<T> = std::result::Result<T, PointingError>;
