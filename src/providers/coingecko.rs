use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::price_provider::PriceProvider;

// CoinGecko simple-price endpoint. Response is keyed by coin id, each value
// an object with one field per requested vs_currency:
// {"bitcoin": {"usd": 67000.12}}
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("coindash/0.1")
            .timeout(request_timeout)
            .build()?;
        Ok(CoinGeckoProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[derive(Deserialize, Debug)]
struct CoinQuote {
    usd: Option<f64>,
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(
        name = "CoinGeckoPriceFetch",
        skip(self),
        fields(coin = %coin)
    )]
    async fn fetch_price(&self, coin: &str) -> Result<f64> {
        let url = format!("{}/api/v3/simple/price", self.base_url);
        debug!("Requesting price data from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", coin), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for coin: {} URL: {}", e, coin, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for coin: {}",
                response.status(),
                coin
            ));
        }

        let text = response.text().await?;
        let data: HashMap<String, CoinQuote> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", coin, e))?;

        data.get(coin)
            .and_then(|quote| quote.usd)
            .ok_or_else(|| anyhow!("No USD price found for coin: {}", coin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(coin: &str, mock_response: &str) -> wiremock::MockServer {
        let mock_server = wiremock::MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", coin))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(base_url: &str) -> CoinGeckoProvider {
        CoinGeckoProvider::new(base_url, Duration::from_secs(10)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_response = r#"{"bitcoin": {"usd": 67000.12}}"#;
        let mock_server = create_mock_server("bitcoin", mock_response).await;

        let provider = provider(&mock_server.uri());
        let price = provider.fetch_price("bitcoin").await.unwrap();
        assert_eq!(price, 67000.12);
    }

    #[tokio::test]
    async fn test_unknown_coin_returns_empty_object() {
        // CoinGecko answers 200 with an empty object for unknown ids
        let mock_response = r#"{}"#;
        let mock_server = create_mock_server("notacoin", mock_response).await;

        let provider = provider(&mock_server.uri());
        let result = provider.fetch_price("notacoin").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No USD price found for coin: notacoin"
        );
    }

    #[tokio::test]
    async fn test_missing_usd_field() {
        let mock_response = r#"{"bitcoin": {}}"#;
        let mock_server = create_mock_server("bitcoin", mock_response).await;

        let provider = provider(&mock_server.uri());
        let result = provider.fetch_price("bitcoin").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No USD price found for coin: bitcoin"
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri());
        let result = provider.fetch_price("bitcoin").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for coin: bitcoin"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"not json at all"#;
        let mock_server = create_mock_server("bitcoin", mock_response).await;

        let provider = provider(&mock_server.uri());
        let result = provider.fetch_price("bitcoin").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for bitcoin")
        );
    }
}
