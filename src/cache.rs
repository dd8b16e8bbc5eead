use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Source of the current instant. Injectable so freshness tests do not
/// depend on real wall-clock delays.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually advanced clock for tests.
pub struct ManualClock {
    start: Instant,
    offset: std::sync::Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: std::sync::Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap();
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

/// Key-value cache where every entry expires a fixed duration after it was
/// stored. Expired entries are discarded on access.
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, (V, Instant)>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        let now = self.clock.now();
        let entry = cache.get(key).map(|(value, stored_at)| (value.clone(), *stored_at));
        match entry {
            Some((value, stored_at)) if now.duration_since(stored_at) < self.ttl => {
                debug!("Cache HIT");
                Some(value)
            }
            Some(_) => {
                debug!("Cache STALE");
                cache.remove(key);
                None
            }
            None => {
                debug!("Cache MISS");
                None
            }
        }
    }

    pub async fn put(&self, key: K, value: V) {
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT");
        cache.insert(key, (value, self.clock.now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = TtlCache::<String, i32>::new(Duration::from_secs(60));

        // Initially, cache is empty
        assert!(cache.get(&"key1".to_string()).await.is_none());

        // Put a value
        cache.put("key1".to_string(), 123).await;

        // Get the value
        assert_eq!(cache.get(&"key1".to_string()).await, Some(123));

        // Get a non-existent key
        assert!(cache.get(&"key2".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_entry_expires_after_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache =
            TtlCache::<String, f64>::with_clock(Duration::from_secs(60), clock.clone());

        cache.put("bitcoin".to_string(), 67000.12).await;
        assert_eq!(cache.get(&"bitcoin".to_string()).await, Some(67000.12));

        // Still fresh just inside the window
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"bitcoin".to_string()).await, Some(67000.12));

        // Stale exactly at the window boundary
        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&"bitcoin".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_put_refreshes_timestamp() {
        let clock = Arc::new(ManualClock::new());
        let cache =
            TtlCache::<String, f64>::with_clock(Duration::from_secs(60), clock.clone());

        cache.put("ethereum".to_string(), 2000.0).await;
        clock.advance(Duration::from_secs(45));

        // Overwrite restarts the freshness window
        cache.put("ethereum".to_string(), 2100.0).await;
        clock.advance(Duration::from_secs(45));

        assert_eq!(cache.get(&"ethereum".to_string()).await, Some(2100.0));
    }
}
