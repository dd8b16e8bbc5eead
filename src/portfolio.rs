use crate::currency::CurrencyFormatter;
use crate::pricing::PriceLookup;
use crate::ui;
use anyhow::{Result, anyhow};
use comfy_table::Cell;
use indicatif::ProgressBar;
use tracing::debug;

/// One manually-entered holding: a coin identifier and the amount held.
#[derive(Debug, Clone)]
pub struct PortfolioEntry {
    pub coin: String,
    pub amount: f64,
}

/// Session-scoped portfolio state. Entries live for the duration of the
/// process and are never persisted; adding the same coin twice yields two
/// separate entries that are valued independently.
#[derive(Debug, Default)]
pub struct Session {
    entries: Vec<PortfolioEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry. The identifier is trimmed and lowercased; it must
    /// be non-empty and the amount must be a positive finite number.
    pub fn add_entry(&mut self, coin: &str, amount: f64) -> Result<()> {
        let coin = coin.trim().to_lowercase();
        if coin.is_empty() {
            return Err(anyhow!("Coin identifier must not be empty"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(anyhow!("Amount must be greater than zero"));
        }
        debug!("Adding portfolio entry: {} x {}", coin, amount);
        self.entries.push(PortfolioEntry { coin, amount });
        Ok(())
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Priced view of one portfolio entry. Derived on every render, never
/// stored.
#[derive(Debug, Clone)]
pub struct ValuationRow {
    pub coin: String,
    pub amount: f64,
    pub price_usd: f64,
    pub value_usd: f64,
}

#[derive(Debug)]
pub struct PortfolioValuation {
    pub rows: Vec<ValuationRow>,
    pub total_usd: f64,
}

impl PortfolioValuation {
    pub fn display_as_table(&self, formatter: &CurrencyFormatter) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Coin"),
            ui::header_cell("Amount"),
            ui::header_cell("Price (USD)"),
            ui::header_cell("Value (USD)"),
            ui::header_cell(&format!("Value ({})", formatter.code())),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.coin),
                ui::value_cell(format!("{:.2}", row.amount)),
                ui::value_cell(formatter.format_usd(row.price_usd)),
                ui::value_cell(formatter.format_usd(row.value_usd)),
                ui::value_cell(formatter.format_secondary(row.value_usd)),
            ]);
        }

        let total = format!(
            "{} | {}",
            formatter.format_usd(self.total_usd),
            formatter.format_secondary(self.total_usd)
        );

        let mut output = table.to_string();
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Total Portfolio Value:", ui::StyleType::TotalLabel),
            ui::style_text(&total, ui::StyleType::TotalValue)
        ));
        output
    }
}

/// Values every entry in insertion order. Entries whose price lookup fails
/// are silently skipped: they appear in neither the rows nor the total.
pub async fn value_portfolio(
    entries: &[PortfolioEntry],
    prices: &dyn PriceLookup,
    pb: ProgressBar,
) -> PortfolioValuation {
    let mut rows = Vec::new();
    let mut total_usd = 0.0;

    for entry in entries {
        match prices.get_price(&entry.coin).await {
            Some(price) => {
                let value = price * entry.amount;
                total_usd += value;
                rows.push(ValuationRow {
                    coin: entry.coin.clone(),
                    amount: entry.amount,
                    price_usd: price,
                    value_usd: value,
                });
            }
            None => {
                debug!("Skipping {}: no price available", entry.coin);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    PortfolioValuation { rows, total_usd }
}
