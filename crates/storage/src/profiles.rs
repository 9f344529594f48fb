//! User profile cache
//!
//! Profiles are looked up by email on most authenticated requests. Instead of a
//! process-wide map that only ever grows, [`ProfileCache`] is an explicit
//! service: it is started once at process start, holds a bounded
//! [`MemoryCache`], runs a background sweeper that drops expired entries, and
//! is shut down when the process stops.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storage::profiles::{ProfileCache, ProfileCacheConfig, ProfileSource};
//!
//! # async fn run(source: Arc<dyn ProfileSource>) -> storage::cache::Result<()> {
//! let cache = ProfileCache::start(ProfileCacheConfig::default(), source)?;
//! let _profile = cache.get("Alice@Example.com").await?;
//! cache.shutdown().await;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::cache::{CacheConfig, CacheError, MemoryCache, Result};

/// A user profile as stored in the CMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// CMS document id
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Short bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Where profiles come from on a cache miss
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile for a normalized email, `None` if there is no such user
    async fn fetch_profile(&self, email: &str) -> Result<Option<UserProfile>>;
}

/// Profile cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCacheConfig {
    /// Capacity and TTL of the underlying cache
    pub cache: CacheConfig,
    /// How often the sweeper drops expired entries
    pub sweep_interval: Duration,
}

impl Default for ProfileCacheConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::new()
                .max_entries(500)
                .default_ttl(Some(Duration::from_secs(300))),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl ProfileCacheConfig {
    /// Create a new profile cache configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the underlying cache configuration
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set the sweep interval
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Cache keys are case-insensitive emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Bounded, lifecycle-managed profile cache
pub struct ProfileCache {
    cache: Arc<MemoryCache<UserProfile>>,
    source: Arc<dyn ProfileSource>,
    running: AtomicBool,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl ProfileCache {
    /// Create the cache and spawn its sweeper on the current tokio runtime
    pub fn start(config: ProfileCacheConfig, source: Arc<dyn ProfileSource>) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CacheError::NoRuntime(e.to_string()))?;

        let cache = Arc::new(MemoryCache::new(config.cache.clone()));
        // interval() panics on a zero period.
        let period = config.sweep_interval.max(Duration::from_millis(1));

        let sweeper = runtime.spawn({
            let cache = Arc::clone(&cache);
            async move {
                let mut ticker = tokio::time::interval(period);
                // The first tick completes immediately.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    match cache.evict_expired() {
                        Ok(0) => {}
                        Ok(count) => tracing::debug!("Evicted {} expired profiles", count),
                        Err(e) => {
                            tracing::warn!("Profile sweeper stopping: {}", e);
                            break;
                        }
                    }
                }
            }
        });

        tracing::info!(
            max_entries = config.cache.max_entries,
            sweep_interval_ms = period.as_millis() as u64,
            "Profile cache started"
        );

        Ok(Self {
            cache,
            source,
            running: AtomicBool::new(true),
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Whether [`shutdown`](Self::shutdown) has not been called yet
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(CacheError::ShutDown)
        }
    }

    /// Get a profile, fetching from the source on a miss
    ///
    /// Unknown users (`None` from the source) are not cached.
    pub async fn get(&self, email: &str) -> Result<Option<UserProfile>> {
        self.ensure_running()?;
        let key = normalize_email(email);

        match self.cache.get(&key) {
            Ok(Some(profile)) => {
                tracing::debug!(email = %key, "Profile cache hit");
                return Ok(Some(profile));
            }
            Ok(None) | Err(CacheError::Expired(_)) => {
                tracing::debug!(email = %key, "Profile cache miss");
            }
            Err(e) => return Err(e),
        }

        let profile = self.source.fetch_profile(&key).await.inspect_err(|e| {
            tracing::warn!(email = %key, "Profile fetch failed: {}", e);
        })?;

        // Shutdown may have happened while the fetch was in flight.
        self.ensure_running()?;
        if let Some(profile) = &profile {
            self.cache.put(key, profile.clone(), None)?;
        }

        Ok(profile)
    }

    /// Store a profile directly, e.g. after the user edits it
    pub fn insert(&self, profile: UserProfile) -> Result<()> {
        self.ensure_running()?;
        let key = normalize_email(&profile.email);
        self.cache.put(key, profile, None)
    }

    /// Drop the cached profile for `email`
    pub fn invalidate(&self, email: &str) -> Result<bool> {
        self.ensure_running()?;
        self.cache.remove(&normalize_email(email))
    }

    /// Number of cached profiles
    pub fn len(&self) -> Result<usize> {
        self.cache.len()
    }

    /// Whether no profiles are cached
    pub fn is_empty(&self) -> Result<bool> {
        self.cache.is_empty()
    }

    /// Stop the sweeper and drop every cached profile
    ///
    /// Later calls to `get`, `insert` and `invalidate` fail with
    /// [`CacheError::ShutDown`]. Calling this twice is a no-op.
    pub async fn shutdown(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        let sweeper = match self.sweeper.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = sweeper {
            handle.abort();
            // Resolves with a cancellation error once the task is gone.
            let _ = handle.await;
        }

        if let Err(e) = self.cache.clear() {
            tracing::warn!("Failed to clear profile cache on shutdown: {}", e);
        }

        tracing::info!("Profile cache shut down");
    }
}

impl Drop for ProfileCache {
    fn drop(&mut self) {
        let sweeper = match self.sweeper.get_mut() {
            Ok(sweeper) => sweeper.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = sweeper {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    struct StaticSource {
        profiles: HashMap<String, UserProfile>,
        fetches: AtomicUsize,
        fail: bool,
    }

    impl StaticSource {
        fn new(profiles: Vec<UserProfile>) -> Self {
            Self {
                profiles: profiles
                    .into_iter()
                    .map(|p| (p.email.clone(), p))
                    .collect(),
                fetches: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileSource for StaticSource {
        async fn fetch_profile(&self, email: &str) -> Result<Option<UserProfile>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CacheError::Source("cms unavailable".to_string()));
            }
            Ok(self.profiles.get(email).cloned())
        }
    }

    fn profile(id: &str, email: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: email.to_string(),
            name: Some(format!("User {}", id)),
            avatar_url: None,
            bio: None,
        }
    }

    fn start(source: Arc<StaticSource>, config: ProfileCacheConfig) -> ProfileCache {
        ProfileCache::start(config, source).unwrap()
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@example.com"), "bob@example.com");
    }

    #[test]
    fn test_start_requires_runtime() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let result = ProfileCache::start(ProfileCacheConfig::default(), source);
        assert!(matches!(result, Err(CacheError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn test_get_fetches_once() {
        let source = Arc::new(StaticSource::new(vec![profile("1", "alice@example.com")]));
        let cache = start(Arc::clone(&source), ProfileCacheConfig::default());

        let first = cache.get("alice@example.com").await.unwrap();
        let second = cache.get("ALICE@example.com").await.unwrap();

        assert_eq!(first, Some(profile("1", "alice@example.com")));
        assert_eq!(first, second);
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_not_cached() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let cache = start(Arc::clone(&source), ProfileCacheConfig::default());

        assert_eq!(cache.get("nobody@example.com").await.unwrap(), None);
        assert_eq!(cache.get("nobody@example.com").await.unwrap(), None);

        assert_eq!(source.fetch_count(), 2);
        assert!(cache.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let source = Arc::new(StaticSource::failing());
        let cache = start(Arc::clone(&source), ProfileCacheConfig::default());

        let result = cache.get("alice@example.com").await;
        assert!(matches!(result, Err(CacheError::Source(_))));
        assert!(cache.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_insert_and_invalidate() {
        let source = Arc::new(StaticSource::new(vec![profile("1", "alice@example.com")]));
        let cache = start(Arc::clone(&source), ProfileCacheConfig::default());

        let mut edited = profile("1", "Alice@Example.com");
        edited.bio = Some("Looking on the bright side".to_string());
        cache.insert(edited.clone()).unwrap();

        assert_eq!(cache.get("alice@example.com").await.unwrap(), Some(edited));
        assert_eq!(source.fetch_count(), 0);

        assert!(cache.invalidate("alice@example.com").unwrap());
        assert!(!cache.invalidate("alice@example.com").unwrap());

        cache.get("alice@example.com").await.unwrap();
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let profiles: Vec<UserProfile> = (0..10)
            .map(|i| profile(&i.to_string(), &format!("user{}@example.com", i)))
            .collect();
        let source = Arc::new(StaticSource::new(profiles));
        let config = ProfileCacheConfig::new().cache(CacheConfig::new().max_entries(3));
        let cache = start(Arc::clone(&source), config);

        for i in 0..10 {
            cache.get(&format!("user{}@example.com", i)).await.unwrap();
        }

        assert_eq!(cache.len().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_expired_profile_refetched() {
        let source = Arc::new(StaticSource::new(vec![profile("1", "alice@example.com")]));
        let config = ProfileCacheConfig::new()
            .cache(CacheConfig::new().default_ttl(Some(Duration::from_millis(30))))
            .sweep_interval(Duration::from_secs(60));
        let cache = start(Arc::clone(&source), config);

        cache.get("alice@example.com").await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        cache.get("alice@example.com").await.unwrap();

        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_sweeper_evicts_expired() {
        let source = Arc::new(StaticSource::new(vec![profile("1", "alice@example.com")]));
        let config = ProfileCacheConfig::new()
            .cache(CacheConfig::new().default_ttl(Some(Duration::from_millis(20))))
            .sweep_interval(Duration::from_millis(10));
        let cache = start(Arc::clone(&source), config);

        cache.get("alice@example.com").await.unwrap();
        assert_eq!(cache.len().unwrap(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(cache.len().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_lifecycle() {
        let source = Arc::new(StaticSource::new(vec![profile("1", "alice@example.com")]));
        let cache = start(Arc::clone(&source), ProfileCacheConfig::default());

        cache.get("alice@example.com").await.unwrap();
        assert!(cache.is_running());

        cache.shutdown().await;

        assert!(!cache.is_running());
        assert_eq!(cache.len().unwrap(), 0);
        assert!(matches!(
            cache.get("alice@example.com").await,
            Err(CacheError::ShutDown)
        ));
        assert!(matches!(
            cache.insert(profile("2", "bob@example.com")),
            Err(CacheError::ShutDown)
        ));
        assert!(matches!(
            cache.invalidate("alice@example.com"),
            Err(CacheError::ShutDown)
        ));

        // Second shutdown is a no-op
        cache.shutdown().await;
    }

    #[test]
    fn test_profile_serialization() {
        let json = serde_json::to_string(&profile("1", "alice@example.com")).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","email":"alice@example.com","name":"User 1"}"#
        );

        let parsed: UserProfile = serde_json::from_str(
            r#"{"id":"2","email":"bob@example.com","avatarUrl":"https://cdn.example.com/b.png"}"#,
        )
        .unwrap();
        assert_eq!(parsed.avatar_url.as_deref(), Some("https://cdn.example.com/b.png"));
        assert_eq!(parsed.name, None);
    }
}
