//! Response cache
//!
//! LRU of logical path -> payload. Entries carry the instant they were stored
//! and each lookup decides staleness with its own time-to-live, so list pages,
//! detail views and related lookups can share one cache with different TTLs.

use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Stale time for list pages
pub const LIST_TTL: Duration = Duration::from_secs(5 * 60);
/// Stale time for single records
pub const DETAIL_TTL: Duration = Duration::from_secs(10 * 60);
/// Stale time for records reached through a relationship link
pub const RELATED_TTL: Duration = Duration::from_secs(15 * 60);

const DEFAULT_CAPACITY: usize = 512;

struct CachedEntry {
    stored_at: Instant,
    value: Value,
}

pub struct ResponseCache {
    entries: Mutex<LruCache<String, CachedEntry>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fresh payload for `path`, if one was stored less than `ttl` ago
    pub fn get(&self, path: &str, ttl: Duration) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let fresh = entries
            .get(path)
            .map(|entry| entry.stored_at.elapsed() < ttl)?;

        if !fresh {
            tracing::trace!("cache stale: {}", path);
            entries.pop(path);
            return None;
        }

        entries.get(path).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, path: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(
            path.to_string(),
            CachedEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResponseCache::default();
        cache.insert("/people/1/", json!({"name": "Luke Skywalker"}));
        assert_eq!(
            cache.get("/people/1/", DETAIL_TTL),
            Some(json!({"name": "Luke Skywalker"}))
        );
    }

    #[test]
    fn test_zero_ttl_is_always_stale() {
        let cache = ResponseCache::default();
        cache.insert("/people/1/", json!({}));
        assert_eq!(cache.get("/people/1/", Duration::ZERO), None);
        // stale entries are evicted on lookup
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expires_after_ttl() {
        let cache = ResponseCache::default();
        cache.insert("/films/1/", json!({"title": "A New Hope"}));
        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get("/films/1/", Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = ResponseCache::new(2);
        cache.insert("/a/", json!(1));
        cache.insert("/b/", json!(2));
        cache.insert("/c/", json!(3));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("/a/", LIST_TTL).is_none());
        assert_eq!(cache.get("/c/", LIST_TTL), Some(json!(3)));
    }

    #[test]
    fn test_clear() {
        let cache = ResponseCache::default();
        cache.insert("/a/", json!(1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
