use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://api.coingecko.com".to_string(),
        }
    }
}

/// Display currency derived from USD at a fixed configured rate. This is a
/// static conversion constant, never a live exchange rate.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecondaryCurrencyConfig {
    pub code: String,
    pub symbol: String,
    pub rate_per_usd: f64,
}

impl Default for SecondaryCurrencyConfig {
    fn default() -> Self {
        SecondaryCurrencyConfig {
            code: "PKR".to_string(),
            symbol: "Rs".to_string(),
            rate_per_usd: 280.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub secondary_currency: SecondaryCurrencyConfig,
    /// Freshness window for cached prices, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_compare_ids")]
    pub default_compare_ids: String,
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_compare_ids() -> String {
    "bitcoin, ethereum, dogecoin".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            secondary_currency: SecondaryCurrencyConfig::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            default_compare_ids: default_compare_ids(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "coindash")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/gecko"
secondary_currency:
  code: "INR"
  symbol: "₹"
  rate_per_usd: 83.0
cache_ttl_secs: 30
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/gecko");
        assert_eq!(config.secondary_currency.code, "INR");
        assert_eq!(config.secondary_currency.rate_per_usd, 83.0);
        assert_eq!(config.cache_ttl_secs, 30);
        // Unspecified fields fall back to defaults
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.default_compare_ids, "bitcoin, ethereum, dogecoin");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "https://api.coingecko.com");
        assert_eq!(config.secondary_currency.code, "PKR");
        assert_eq!(config.secondary_currency.symbol, "Rs");
        assert_eq!(config.secondary_currency.rate_per_usd, 280.0);
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.request_timeout_secs, 10);
    }
}
