//! The user-visible pricing boundary.
//!
//! Every failure beneath this layer (network error, timeout, unknown coin,
//! malformed response) collapses into a single observable outcome: no price.
//! Causes are logged at debug level and never surfaced to callers.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::cache::{Clock, TtlCache};
use crate::price_provider::PriceProvider;

#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Returns the current USD price for a coin, or `None` when no price
    /// is available for any reason.
    async fn get_price(&self, coin: &str) -> Option<f64>;
}

/// Fetch-through cache over a [`PriceProvider`].
///
/// A price fetched within the freshness window is reused without network
/// access; a miss or stale entry triggers exactly one fetch. Failed fetches
/// are not cached, so the next lookup retries. The whole check-fetch-store
/// sequence runs under the cache lock, so concurrent callers cannot issue
/// duplicate fetches for the same coin.
pub struct PriceCache {
    provider: Arc<dyn PriceProvider>,
    cache: TtlCache<String, f64>,
    fetch_lock: tokio::sync::Mutex<()>,
}

impl PriceCache {
    pub fn new(provider: Arc<dyn PriceProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: TtlCache::new(ttl),
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn with_clock(
        provider: Arc<dyn PriceProvider>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            cache: TtlCache::with_clock(ttl, clock),
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }
}

#[async_trait]
impl PriceLookup for PriceCache {
    async fn get_price(&self, coin: &str) -> Option<f64> {
        let _guard = self.fetch_lock.lock().await;

        if let Some(price) = self.cache.get(&coin.to_string()).await {
            return Some(price);
        }

        match self.provider.fetch_price(coin).await {
            Ok(price) => {
                self.cache.put(coin.to_string(), price).await;
                Some(price)
            }
            Err(e) => {
                debug!("Price lookup failed for {}: {}", coin, e);
                None
            }
        }
    }
}
