//! Price comparison across a user-supplied list of coins.

use crate::currency::CurrencyFormatter;
use crate::pricing::PriceLookup;
use crate::ui;
use comfy_table::Cell;
use indicatif::ProgressBar;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub coin: String,
    pub price_usd: f64,
}

/// Splits a comma-separated list of coin identifiers. Elements are trimmed,
/// empty elements dropped; order and duplicates are preserved.
pub fn parse_coin_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Looks up each coin in order. Coins with no available price are dropped
/// from the result. Every invocation recomputes from scratch.
pub async fn compare(
    coins: &[String],
    prices: &dyn PriceLookup,
    pb: ProgressBar,
) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    for coin in coins {
        match prices.get_price(coin).await {
            Some(price) => rows.push(ComparisonRow {
                coin: coin.clone(),
                price_usd: price,
            }),
            None => debug!("Dropping {} from comparison: no price available", coin),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    rows
}

pub fn display_as_table(rows: &[ComparisonRow], formatter: &CurrencyFormatter) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Coin"),
        ui::header_cell("Price (USD)"),
        ui::header_cell(&format!("Price ({})", formatter.code())),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.coin),
            ui::value_cell(formatter.format_usd(row.price_usd)),
            ui::value_cell(formatter.format_secondary(row.price_usd)),
        ]);
    }

    table.to_string()
}
