//! Pointing session
//!
//! Caller-owned state for one antenna: observer, elevation mask, catalog,
//! the last visibility pass and the selected satellite. Every change
//! recomputes the visible list at the last refresh instant, so the
//! selection always names a satellite in the current list or nothing.

use chrono::{DateTime, Utc};
use mgrs_grid::{CacheStats, DecodeCache};
use orbital_mechanics::{parse_catalog, OrbitalElements, TleEntry};
use tracing::{debug, info};

use crate::config::clamp_elevation;
use crate::visibility::{compute_visibility, select_satellite, VisibilityRecord};
use crate::{Observer, PointingConfig, Result};

#[derive(Debug, Clone)]
pub struct PointingSession {
    observer: Option<Observer>,
    min_elevation_deg: f64,
    elements: Vec<OrbitalElements>,
    visible: Vec<VisibilityRecord>,
    selected: Option<String>,
    last_refresh: Option<DateTime<Utc>>,
    cache: DecodeCache,
}

impl PointingSession {
    pub fn new(config: &PointingConfig) -> Self {
        Self {
            observer: None,
            min_elevation_deg: config.elevation_threshold(),
            elements: Vec::new(),
            visible: Vec::new(),
            selected: None,
            last_refresh: None,
            cache: DecodeCache::new(config.decode_cache_capacity),
        }
    }

    /// Decode a new observer position.
    ///
    /// On failure the current observer is left untouched.
    pub fn set_observer(&mut self, mgrs: &str, height_m: f64) -> Result<()> {
        let observer = Observer::from_mgrs_cached(mgrs, height_m, &mut self.cache)?;
        info!(mgrs = %observer.mgrs_canonical, height_m, "Observer set");
        self.recompute_with(Some(observer));
        Ok(())
    }

    /// Change the observer height, keeping its position.
    ///
    /// Returns `false` when there is no observer to update.
    pub fn set_height(&mut self, height_m: f64) -> Result<bool> {
        let Some(current) = &self.observer else {
            return Ok(false);
        };
        let observer = current.with_height(height_m)?;
        self.recompute_with(Some(observer));
        Ok(true)
    }

    /// Set the elevation mask and return the value actually applied
    pub fn set_min_elevation(&mut self, degrees: f64) -> f64 {
        self.min_elevation_deg = clamp_elevation(degrees);
        self.recompute();
        self.min_elevation_deg
    }

    /// Replace the catalog
    pub fn load_catalog(&mut self, elements: Vec<OrbitalElements>) {
        info!(satellites = elements.len(), "Catalog loaded");
        self.elements = elements;
        self.recompute();
    }

    /// Parse and load raw entries, returning how many were usable
    pub fn load_entries(&mut self, entries: &[TleEntry]) -> usize {
        let elements = parse_catalog(entries);
        let count = elements.len();
        self.load_catalog(elements);
        count
    }

    pub fn clear_observer(&mut self) {
        self.recompute_with(None);
    }

    /// Recompute the visible list at `at` and re-apply the selection rule
    pub fn refresh(&mut self, at: DateTime<Utc>) -> &[VisibilityRecord] {
        self.last_refresh = Some(at);
        self.recompute();
        &self.visible
    }

    /// Assign the antenna to `id` if it is currently visible
    pub fn select(&mut self, id: &str) -> bool {
        if self.visible.iter().any(|r| r.satellite_id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            debug!(id, "Ignoring selection of a satellite that is not visible");
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_record(&self) -> Option<&VisibilityRecord> {
        let id = self.selected.as_deref()?;
        self.visible.iter().find(|r| r.satellite_id == id)
    }

    pub fn visible(&self) -> &[VisibilityRecord] {
        &self.visible
    }

    pub fn observer(&self) -> Option<&Observer> {
        self.observer.as_ref()
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation_deg
    }

    pub fn elements(&self) -> &[OrbitalElements] {
        &self.elements
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn recompute_with(&mut self, observer: Option<Observer>) {
        self.observer = observer;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = match (&self.observer, self.last_refresh) {
            (Some(observer), Some(at)) => compute_visibility(observer, &self.elements, at, self.min_elevation_deg),
            _ => Vec::new(),
        };
        let selected = select_satellite(self.selected.as_deref(), &self.visible);
        if selected != self.selected {
            debug!(from = ?self.selected, to = ?selected, "Selection changed");
        }
        self.selected = selected;
    }
}

impl Default for PointingSession {
    fn default() -> Self {
        Self::new(&PointingConfig::default())
    }
}
