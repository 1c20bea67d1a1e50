//! In-process TTL cache
//!
//! Entries expire a fixed time after insertion. Expired entries read as
//! misses and are replaced by the next insert for the same key.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Key-value cache scoped to one kind of value
#[async_trait::async_trait]
pub trait ScopedCache<V>: Send + Sync {
    /// Live value for `key`, if any
    async fn get(&self, key: &str) -> Option<Cached<V>>;

    async fn insert(&self, key: &str, value: V) -> Cached<V>;

    async fn invalidate(&self, key: &str);

    async fn clear(&self);
}

/// A cached value and the time it was stored
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<V> {
    pub value: V,
    pub cached_at: DateTime<Utc>,
}

pub struct TtlCache<V> {
    ttl: chrono::Duration,
    entries: RwLock<HashMap<String, Cached<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::weeks(52 * 100));
        Self { ttl, entries: RwLock::new(HashMap::new()), clock }
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, cached| now - cached.cached_at < self.ttl);
        before - entries.len()
    }
}

#[async_trait::async_trait]
impl<V> ScopedCache<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<Cached<V>> {
        let entries = self.entries.read().await;
        let cached = entries.get(key)?;

        let age = self.clock.now() - cached.cached_at;
        if age >= self.ttl {
            debug!("Cache entry {} expired (age: {}s)", key, age.num_seconds());
            return None;
        }

        debug!("Cache hit for key: {}", key);
        Some(cached.clone())
    }

    async fn insert(&self, key: &str, value: V) -> Cached<V> {
        let cached = Cached { value, cached_at: self.clock.now() };
        self.entries.write().await.insert(key.to_string(), cached.clone());
        debug!("Cached data for key: {} with TTL: {}s", key, self.ttl.num_seconds());
        cached
    }

    async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
        debug!("Deleted cache key: {}", key);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
        debug!("Cleared cache");
    }
}
