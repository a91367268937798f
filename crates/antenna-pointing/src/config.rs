//! Pointing configuration

use std::time::Duration;

use orbital_mechanics::angles::clamp_number;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_REFRESH_INTERVAL_S: f64 = 5.0;

/// Shortest refresh period a caller can ask for
pub const MIN_REFRESH_INTERVAL_S: f64 = 0.1;

/// Longest refresh period; larger requests are capped to one day
pub const MAX_REFRESH_INTERVAL_S: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointingConfig {
    /// Elevation mask in degrees, clamped to [0, 90] when applied
    pub min_elevation_deg: f64,
    /// Grid references memoized per session; 0 disables the cache
    pub decode_cache_capacity: usize,
    /// Seconds between periodic refresh ticks
    pub refresh_interval_s: f64,
    /// Observer height used when none is given
    pub default_height_m: f64,
}

impl Default for PointingConfig {
    fn default() -> Self {
        Self {
            min_elevation_deg: DEFAULT_MIN_ELEVATION_DEG,
            decode_cache_capacity: DEFAULT_CACHE_CAPACITY,
            refresh_interval_s: DEFAULT_REFRESH_INTERVAL_S,
            default_height_m: 0.0,
        }
    }
}

impl PointingConfig {
    /// Effective elevation mask
    pub fn elevation_threshold(&self) -> f64 {
        clamp_elevation(self.min_elevation_deg)
    }

    /// Effective refresh period, within [`MIN_REFRESH_INTERVAL_S`,
    /// `MAX_REFRESH_INTERVAL_S`]; non-positive or non-finite values use the
    /// default
    pub fn refresh_interval(&self) -> Duration {
        let seconds = if self.refresh_interval_s.is_finite() && self.refresh_interval_s > 0.0 {
            clamp_number(self.refresh_interval_s, MIN_REFRESH_INTERVAL_S, MAX_REFRESH_INTERVAL_S)
        } else {
            DEFAULT_REFRESH_INTERVAL_S
        };
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::from_secs(DEFAULT_REFRESH_INTERVAL_S as u64))
    }
}

/// Clamp an elevation mask to [0, 90]; non-finite values fall back to the
/// default
pub fn clamp_elevation(value: f64) -> f64 {
    if value.is_finite() {
        clamp_number(value, 0.0, 90.0)
    } else {
        DEFAULT_MIN_ELEVATION_DEG
    }
}
