//! Quote-source abstraction for fetching a coin's current USD price.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches the current USD price for a coin identifier (e.g. "bitcoin").
    async fn fetch_price(&self, coin: &str) -> Result<f64>;
}
