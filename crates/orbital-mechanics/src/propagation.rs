//! Two-body propagation
//!
//! Mean anomaly is advanced linearly from epoch, Kepler's equation is solved
//! by Newton iteration, and the perifocal position is rotated into the
//! inertial frame with the 3-1-3 sequence (Ω, i, ω + ν).

use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};
use tracing::debug;

use crate::angles::normalize_radians;
use crate::tle::OrbitalElements;
use crate::{OrbitalError, Result};

pub const KEPLER_MAX_ITERATIONS: usize = 10;
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Result of the Newton solve; the last iterate is kept even if it did not
/// converge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Radians
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// Size of the final Newton step
    pub last_correction: f64,
}

impl KeplerSolution {
    pub fn converged(&self) -> bool {
        self.last_correction.abs() < KEPLER_TOLERANCE
    }
}

/// Solve `E - e sin E = M` for E, starting from `E = M`.
///
/// `mean_anomaly` is reduced to [0, 2π) first.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let m = normalize_radians(mean_anomaly);
    let mut e_anom = m;
    let mut correction = 0.0;
    let mut iterations = 0;

    while iterations < KEPLER_MAX_ITERATIONS {
        correction = (e_anom - eccentricity * e_anom.sin() - m) / (1.0 - eccentricity * e_anom.cos());
        e_anom -= correction;
        iterations += 1;
        if correction.abs() < KEPLER_TOLERANCE {
            break;
        }
    }

    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations,
        last_correction: correction,
    }
}

/// True anomaly from eccentric anomaly
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity)
}

/// Inertial state at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub time: DateTime<Utc>,
    /// Radians, [0, 2π)
    pub mean_anomaly_rad: f64,
    pub eccentric_anomaly_rad: f64,
    pub true_anomaly_rad: f64,
    pub radius_km: f64,
    /// ECI position (km)
    pub position_eci: Vector3<f64>,
    pub kepler: KeplerSolution,
}

/// Seconds from `from` to `to`, sub-second precision where it fits
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Propagate `elements` to `time`
pub fn propagate(elements: &OrbitalElements, time: DateTime<Utc>) -> Result<OrbitState> {
    let dt = seconds_between(elements.epoch, time);
    let e = elements.eccentricity;

    let mean_anomaly =
        normalize_radians(elements.mean_anomaly_deg.to_radians() + elements.mean_motion_rad_per_sec * dt);
    let kepler = solve_kepler(mean_anomaly, e);
    if !kepler.converged() {
        debug!(
            id = %elements.id,
            iterations = kepler.iterations,
            correction = kepler.last_correction,
            "Kepler solve hit the iteration cap"
        );
    }

    let e_anom = kepler.eccentric_anomaly;
    let nu = true_anomaly(e_anom, e);
    let radius_km = elements.semi_major_axis_km * (1.0 - e * e_anom.cos());

    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), elements.raan_deg.to_radians())
        * Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inclination_deg.to_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), elements.arg_perigee_deg.to_radians() + nu);
    let position_eci = rotation * Vector3::new(radius_km, 0.0, 0.0);

    if !position_eci.iter().all(|c| c.is_finite()) {
        return Err(OrbitalError::PropagationFailed(format!(
            "non-finite position for {} at {}",
            elements.id, time
        )));
    }

    Ok(OrbitState {
        time,
        mean_anomaly_rad: mean_anomaly,
        eccentric_anomaly_rad: e_anom,
        true_anomaly_rad: nu,
        radius_km,
        position_eci,
        kepler,
    })
}
