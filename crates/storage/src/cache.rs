//! Cache management system
//!
//! This module provides a bounded in-memory cache with LRU eviction and TTL
//! support. Capacity is fixed at construction; nothing grows without bound.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Cache error types
#[derive(Debug, Error)]
pub enum CacheError {
    /// Entry expired
    #[error("Entry expired: {0}")]
    Expired(String),

    /// A thread panicked while holding the cache lock
    #[error("Cache lock poisoned")]
    LockPoisoned,

    /// The cache was used after shutdown
    #[error("Cache has been shut down")]
    ShutDown,

    /// No tokio runtime to run the background sweeper on
    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    /// The backing data source failed
    #[error("Source error: {0}")]
    Source(String),
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Cache entry with metadata
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    /// The cached value
    value: V,
    /// When the entry expires (None = never)
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(|d| Instant::now().checked_add(d));
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in memory cache
    pub max_entries: usize,
    /// Default TTL for entries
    pub default_ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: Some(Duration::from_secs(3600)), // 1 hour
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Set default TTL
    pub fn default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// In-memory LRU cache
pub struct MemoryCache<V> {
    cache: Mutex<LruCache<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> MemoryCache<V> {
    /// Create a new memory cache
    ///
    /// A `max_entries` of zero is treated as one.
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            config,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruCache<String, CacheEntry<V>>>> {
        self.cache.lock().map_err(|_| CacheError::LockPoisoned)
    }

    /// The configuration this cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a value from the cache
    ///
    /// Expired entries are removed and reported as [`CacheError::Expired`].
    pub fn get(&self, key: &str) -> Result<Option<V>> {
        let mut cache = self.lock()?;

        if cache.peek(key).is_some_and(CacheEntry::is_expired) {
            cache.pop(key);
            return Err(CacheError::Expired(key.to_string()));
        }

        Ok(cache.get(key).map(|entry| entry.value.clone()))
    }

    /// Put a value in the cache, evicting the least recently used entry when
    /// full. `ttl` overrides the configured default.
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let entry = CacheEntry::new(value, ttl.or(self.config.default_ttl));
        self.lock()?.put(key.into(), entry);
        Ok(())
    }

    /// Remove a value from the cache
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.pop(key).is_some())
    }

    /// Clear all entries
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Check if key exists and is not expired
    pub fn contains(&self, key: &str) -> Result<bool> {
        let mut cache = self.lock()?;

        match cache.peek(key) {
            Some(entry) if entry.is_expired() => {
                cache.pop(key);
                Ok(false)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    /// Get the number of entries, expired ones included until evicted
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Remove expired entries, returning how many were dropped
    pub fn evict_expired(&self) -> Result<usize> {
        let mut cache = self.lock()?;

        let expired_keys: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            cache.pop(key);
        }

        Ok(expired_keys.len())
    }
}
