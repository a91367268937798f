//! Visibility records, elevation mask and selection
//!
//! Every pass is recomputed from scratch: [`evaluate`] produces one record
//! per catalog entry, [`filter_visible`] applies the mask and orders by
//! elevation, [`select_satellite`] carries the assignment over.

use chrono::{DateTime, Utc};
use orbital_mechanics::transforms::{eci_to_ecef, gmst_rad, sub_point};
use orbital_mechanics::OrbitalElements;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::look::calculate_look_angles;
use crate::Observer;

/// Where one satellite appears from the observer at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRecord {
    pub satellite_id: String,
    pub name: String,
    /// [0, 360)
    pub azimuth_deg: f64,
    /// (-90, 90]
    pub elevation_deg: f64,
    pub range_km: f64,
    pub sub_lat_deg: f64,
    pub sub_lon_deg: f64,
    /// Height above the spherical Earth
    pub altitude_km: f64,
}

impl VisibilityRecord {
    fn is_finite(&self) -> bool {
        [
            self.azimuth_deg,
            self.elevation_deg,
            self.range_km,
            self.sub_lat_deg,
            self.sub_lon_deg,
            self.altitude_km,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// One record per satellite, in catalog order, with no elevation mask.
///
/// Satellites whose geometry is not finite are logged and left out.
pub fn evaluate(observer: &Observer, elements: &[OrbitalElements], at: DateTime<Utc>) -> Vec<VisibilityRecord> {
    let gmst = gmst_rad(at);

    elements
        .iter()
        .filter_map(|sat| {
            let state = match sat.propagate(at) {
                Ok(state) => state,
                Err(e) => {
                    warn!(id = %sat.id, name = %sat.name, error = %e, "Skipping satellite");
                    return None;
                }
            };
            let ecef = eci_to_ecef(&state.position_eci, gmst);
            let angles = calculate_look_angles(observer, &ecef);
            let sub = sub_point(&ecef);

            let record = VisibilityRecord {
                satellite_id: sat.id.clone(),
                name: sat.name.clone(),
                azimuth_deg: angles.azimuth_deg,
                elevation_deg: angles.elevation_deg,
                range_km: angles.range_km,
                sub_lat_deg: sub.latitude,
                sub_lon_deg: sub.longitude,
                altitude_km: sub.altitude_km,
            };
            if record.is_finite() {
                Some(record)
            } else {
                warn!(id = %sat.id, name = %sat.name, "Skipping satellite with non-finite geometry");
                None
            }
        })
        .collect()
}

/// Keep records at or above `min_elevation_deg`, highest first.
///
/// Equal elevations keep their catalog order.
pub fn filter_visible(mut records: Vec<VisibilityRecord>, min_elevation_deg: f64) -> Vec<VisibilityRecord> {
    records.retain(|r| r.elevation_deg >= min_elevation_deg);
    records.sort_by(|a, b| b.elevation_deg.total_cmp(&a.elevation_deg));
    records
}

/// Visible satellites for `observer` at `at`
pub fn compute_visibility(
    observer: &Observer,
    elements: &[OrbitalElements],
    at: DateTime<Utc>,
    min_elevation_deg: f64,
) -> Vec<VisibilityRecord> {
    let evaluated = evaluate(observer, elements, at);
    let total = evaluated.len();
    let visible = filter_visible(evaluated, min_elevation_deg);
    debug!(
        mgrs = %observer.mgrs_canonical,
        catalog = elements.len(),
        evaluated = total,
        visible = visible.len(),
        min_elevation_deg,
        "Visibility pass"
    );
    visible
}

/// Keep `previous` if it is still visible, otherwise take the highest
/// satellite, or nothing when the list is empty
pub fn select_satellite(previous: Option<&str>, visible: &[VisibilityRecord]) -> Option<String> {
    previous
        .filter(|id| visible.iter().any(|r| r.satellite_id == *id))
        .map(str::to_string)
        .or_else(|| visible.first().map(|r| r.satellite_id.clone()))
}
