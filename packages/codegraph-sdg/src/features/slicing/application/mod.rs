//! Slicing Application Layer
//!
//! `ProgramSlicer`: memoizing slicer over a built SDG.

use crate::errors::Result;
use crate::features::sdg::SystemDependenceGraph;
use crate::features::slicing::domain::{Slice, SlicingCriterion};
use crate::shared::models::NodeId;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::trace;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Slicer with an LRU cache keyed by criterion.
///
/// The SDG is borrowed immutably, so cached slices never go stale.
pub struct ProgramSlicer<'g> {
    sdg: &'g SystemDependenceGraph,
    /// `None` when the configured capacity is 0
    cache: Option<LruCache<SlicingCriterion, Slice>>,
    hits: u64,
    misses: u64,
}

impl<'g> ProgramSlicer<'g> {
    /// Cache capacity from the SDG's slicing config
    pub fn new(sdg: &'g SystemDependenceGraph) -> Self {
        Self::with_capacity(sdg, sdg.config().slicing_config().cache_capacity)
    }

    pub fn with_capacity(sdg: &'g SystemDependenceGraph, capacity: usize) -> Self {
        ProgramSlicer {
            sdg,
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    /// Backward slice, served from the cache when possible.
    /// Errors (unbuilt SDG, unknown node) are never cached.
    pub fn slice(&mut self, criterion: &SlicingCriterion) -> Result<Slice> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(slice) = cache.get(criterion) {
                self.hits += 1;
                trace!(%criterion, "slice cache hit");
                return Ok(slice.clone());
            }
        }
        self.misses += 1;

        let slice = self.sdg.slice(criterion)?;
        if let Some(cache) = self.cache.as_mut() {
            cache.put(criterion.clone(), slice.clone());
        }
        Ok(slice)
    }

    /// Slice restricted to `variable`
    pub fn slice_variable(&mut self, node: NodeId, variable: &str) -> Result<Slice> {
        self.slice(&SlicingCriterion::restricted(node, variable))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.as_ref().map_or(0, |c| c.len()),
            capacity: self.cache.as_ref().map_or(0, |c| c.cap().get()),
        }
    }

    /// Drop cached slices and reset counters
    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.hits = 0;
        self.misses = 0;
    }
}
