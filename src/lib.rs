pub mod cache;
pub mod compare;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod log;
pub mod portfolio;
pub mod price_provider;
pub mod pricing;
pub mod providers;
pub mod ui;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::currency::CurrencyFormatter;
use crate::pricing::{PriceCache, PriceLookup};
use crate::providers::coingecko::CoinGeckoProvider;

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Print one coin's current price.
    Price { coin: String },
    /// Compare prices across a comma-separated list of coins.
    Compare { ids: Option<String> },
    /// Interactive portfolio session.
    Dashboard,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Crypto dashboard starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = CoinGeckoProvider::new(
        &config.provider.base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let prices = PriceCache::new(
        Arc::new(provider),
        Duration::from_secs(config.cache_ttl_secs),
    );
    let formatter = CurrencyFormatter::new(
        &config.secondary_currency.code,
        &config.secondary_currency.symbol,
        config.secondary_currency.rate_per_usd,
    );

    match command {
        AppCommand::Price { coin } => {
            let coin = coin.trim().to_lowercase();
            match prices.get_price(&coin).await {
                Some(price) => println!(
                    "{}: {} | {}",
                    coin,
                    formatter.format_usd(price),
                    formatter.format_secondary(price)
                ),
                None => println!(
                    "{}",
                    ui::style_text(
                        &format!("No price available for {coin}"),
                        ui::StyleType::Error
                    )
                ),
            }
            Ok(())
        }
        AppCommand::Compare { ids } => {
            let input = ids.unwrap_or_else(|| config.default_compare_ids.clone());
            let coins = compare::parse_coin_ids(&input);
            let pb = ui::new_progress_bar(coins.len() as u64, true);
            pb.set_message("Fetching prices...");
            let rows = compare::compare(&coins, &prices, pb).await;
            if rows.is_empty() {
                println!(
                    "{}",
                    ui::style_text("No prices available for those coins", ui::StyleType::Info)
                );
            } else {
                println!("{}", compare::display_as_table(&rows, &formatter));
            }
            Ok(())
        }
        AppCommand::Dashboard => dashboard::run(&prices, &formatter, &config).await,
    }
}
