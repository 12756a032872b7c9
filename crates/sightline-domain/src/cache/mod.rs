//! Subordinate-set caching with TTL eviction.
//!
//! Resolving a manager's subordinates costs one directory lookup per
//! hierarchy level plus one per subordinate role. This module caches the
//! resolved user-ID set per manager, using Moka for concurrent access with
//! TTL-based eviction.
//!
//! # Cache Safety
//!
//! Caching is **disabled** by default (`enabled: false`). A cached
//! subordinate set keeps serving the old hierarchy after a role or user is
//! moved, until the TTL expires; that widens visibility for managers
//! whose subtree shrank. Enable caching only when:
//! 1. That staleness window is acceptable for your hierarchy churn
//! 2. Administrative role/user updates invalidate affected entries
//!
//! # Example
//!
//! ```rust,ignore
//! use sightline_domain::cache::{SubordinateCache, SubordinateCacheConfig};
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! // Explicitly enable caching (opt-in for safety)
//! let config = SubordinateCacheConfig::default().with_enabled(true);
//! let cache = SubordinateCache::new(config);
//!
//! cache.insert("mgr-1", Arc::new(HashSet::from(["u1".to_string()]))).await;
//! assert!(cache.get("mgr-1").await.is_some());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Configuration for the subordinate-set cache.
#[derive(Debug, Clone)]
pub struct SubordinateCacheConfig {
    /// Whether caching is enabled.
    ///
    /// Defaults to `false`: a cached set can serve stale hierarchy data
    /// until its TTL expires. Enable explicitly when that is acceptable.
    pub enabled: bool,
    /// Maximum number of cached managers.
    pub max_entries: u64,
    /// How long a resolved set stays valid.
    pub ttl: Duration,
}

impl Default for SubordinateCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_entries: 10_000,
            ttl: Duration::from_secs(10),
        }
    }
}

impl SubordinateCacheConfig {
    /// Sets whether caching is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the maximum number of cached managers.
    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cache of resolved subordinate user-ID sets, keyed by manager user ID.
pub struct SubordinateCache {
    inner: Cache<String, Arc<HashSet<String>>>,
    enabled: bool,
}

impl SubordinateCache {
    /// Creates a cache from the given configuration.
    pub fn new(config: SubordinateCacheConfig) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
            enabled: config.enabled,
        }
    }

    /// Returns the cached set for `manager_id`, if present and enabled.
    pub async fn get(&self, manager_id: &str) -> Option<Arc<HashSet<String>>> {
        if !self.enabled {
            return None;
        }
        self.inner.get(manager_id).await
    }

    /// Stores a resolved set for `manager_id`. No-op when disabled.
    pub async fn insert(&self, manager_id: &str, subordinates: Arc<HashSet<String>>) {
        if !self.enabled {
            return;
        }
        self.inner.insert(manager_id.to_string(), subordinates).await;
    }

    /// Drops the cached set for one manager, e.g. after their subtree
    /// changed.
    pub async fn invalidate(&self, manager_id: &str) {
        self.inner.invalidate(manager_id).await;
    }

    /// Drops every cached set, e.g. after a bulk hierarchy import.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl fmt::Debug for SubordinateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubordinateCache")
            .field("enabled", &self.enabled)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
