//! In-process TTL cache.
//!
//! Holds analysis results keyed by image fingerprint. Expired entries are
//! treated as misses on read and removed; a background loop in the API
//! calls [`TtlCache::purge_expired`] so untouched keys do not pile up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;

/// Default lifetime of a cached analysis.
pub const DEFAULT_ANALYSIS_TTL: Duration = Duration::from_secs(3600);

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a live entry.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Expired: drop it unless a writer refreshed it in between.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl).await;
    }

    pub async fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Remove a key. Returns whether a live entry was present.
    pub async fn remove(&self, key: &str) -> bool {
        self.entries
            .write()
            .await
            .remove(key)
            .is_some_and(|e| e.expires_at > Instant::now())
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().await.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hit_and_miss_are_counted() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1).await;

        assert_eq!(cache.get("a").await, Some(1));
        assert_eq!(cache.get("b").await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn expired_entries_are_misses_and_dropped() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert_with_ttl("gone", "x".to_string(), Duration::ZERO).await;

        assert_eq!(cache.get("gone").await, None);
        assert_eq!(cache.stats().await.entries, 0);
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("live", 1).await;
        cache.insert_with_ttl("dead1", 2, Duration::ZERO).await;
        cache.insert_with_ttl("dead2", 3, Duration::ZERO).await;

        assert_eq!(cache.purge_expired().await, 2);
        assert_eq!(cache.stats().await.entries, 1);
        assert_eq!(cache.get("live").await, Some(1));
    }

    #[tokio::test]
    async fn insert_overwrites_and_remove_reports_presence() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1).await;
        cache.insert("k", 2).await;
        assert_eq!(cache.get("k").await, Some(2));

        assert!(cache.remove("k").await);
        assert!(!cache.remove("k").await);
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let cache: TtlCache<i32> = TtlCache::default();
        assert_eq!(cache.default_ttl(), DEFAULT_ANALYSIS_TTL);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.clear().await;
        assert_eq!(cache.stats().await.entries, 0);
    }
}
