//! Configuration for the subordinate resolver.

use std::sync::Arc;

use crate::cache::SubordinateCache;

/// Configuration for hierarchy traversal.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of hierarchy levels to descend.
    ///
    /// The visited set already guarantees termination on cyclic data; the
    /// depth bound additionally caps the cost of pathologically deep
    /// hierarchies. Hitting it returns a partial set, never an error.
    pub max_depth: u32,
    /// Concurrent directory lookups per hierarchy level.
    pub lookup_concurrency: usize,
    /// Optional cache for resolved subordinate sets.
    ///
    /// Disabled by default: a cached set can serve stale hierarchy data
    /// until its TTL expires after a role or user is moved.
    pub cache: Option<Arc<SubordinateCache>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 25,
            lookup_concurrency: 16,
            cache: None,
        }
    }
}

impl ResolverConfig {
    /// Creates a new configuration with the specified max depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Creates a new configuration with the specified per-level lookup
    /// concurrency.
    pub fn with_lookup_concurrency(mut self, lookup_concurrency: usize) -> Self {
        self.lookup_concurrency = lookup_concurrency;
        self
    }

    /// Creates a new configuration with caching enabled.
    pub fn with_cache(mut self, cache: Arc<SubordinateCache>) -> Self {
        self.cache = Some(cache);
        self
    }
}
