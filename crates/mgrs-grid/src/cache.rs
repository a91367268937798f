//! Bounded memo for decoded grid references
//!
//! Owned by the caller and passed in explicitly; nothing here is global.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::{GridPoint, GridReference, Result};

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Canonical reference text → decoded cell centre, FIFO eviction
#[derive(Debug, Clone)]
pub struct DecodeCache {
    capacity: usize,
    entries: HashMap<String, GridPoint>,
    order: VecDeque<String>,
    stats: CacheStats,
}

impl DecodeCache {
    /// A capacity of zero disables memoization
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Centre of `reference`, decoded once per canonical text.
    ///
    /// Failures are returned to the caller and never stored.
    pub fn center(&mut self, reference: &GridReference) -> Result<GridPoint> {
        let key = reference.canonical();
        if let Some(point) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!(mgrs = %key, "decode cache hit");
            return Ok(*point);
        }

        self.stats.misses += 1;
        let point = reference.center()?;

        if self.capacity > 0 {
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                    self.stats.evictions += 1;
                    debug!(mgrs = %oldest, "decode cache eviction");
                }
            }
            self.order.push_back(key.clone());
            self.entries.insert(key, point);
        }

        Ok(point)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for DecodeCache {
    fn default() -> Self {
        Self::new(64)
    }
}
