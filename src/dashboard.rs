//! Interactive dashboard session.
//!
//! Hosts the portfolio for exactly as long as the loop runs; entries are
//! never persisted and are lost when the session ends.

use crate::compare;
use crate::config::AppConfig;
use crate::currency::CurrencyFormatter;
use crate::portfolio::{Session, value_portfolio};
use crate::pricing::PriceLookup;
use crate::ui;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "Commands:
  add <coin> <amount>   Add a holding (e.g. add bitcoin 2)
  show                  Show the portfolio table and total value
  compare [ids]         Compare prices for comma-separated coin ids
  help                  Show this help
  quit                  End the session";

pub async fn run(
    prices: &dyn PriceLookup,
    formatter: &CurrencyFormatter,
    config: &AppConfig,
) -> Result<()> {
    println!("{}", ui::style_text("Crypto Dashboard", ui::StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            "Live crypto prices | Portfolio tracking | Comparison tool",
            ui::StyleType::Info
        )
    );
    println!("{HELP}\n");

    let mut session = Session::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(cmd) => cmd,
            None => continue,
        };

        match command {
            "add" => {
                let coin = parts.next().unwrap_or("");
                let amount = parts.next().unwrap_or("").parse::<f64>().unwrap_or(-1.0);
                match session.add_entry(coin, amount) {
                    Ok(()) => println!("Added {} x {}", coin.to_lowercase(), amount),
                    Err(e) => println!(
                        "{}",
                        ui::style_text(&format!("Usage: add <coin> <amount> ({e})"), ui::StyleType::Error)
                    ),
                }
            }
            "show" => {
                if session.is_empty() {
                    println!(
                        "{}",
                        ui::style_text(
                            "Add coins to your portfolio with: add <coin> <amount>",
                            ui::StyleType::Info
                        )
                    );
                    continue;
                }
                let pb = ui::new_progress_bar(session.entries().len() as u64, true);
                pb.set_message("Fetching prices...");
                let valuation = value_portfolio(session.entries(), prices, pb).await;
                println!("{}", valuation.display_as_table(formatter));
            }
            "compare" => {
                let ids: String = parts.collect::<Vec<_>>().join(" ");
                let input = if ids.is_empty() {
                    config.default_compare_ids.clone()
                } else {
                    ids
                };
                let coins = compare::parse_coin_ids(&input);
                let pb = ui::new_progress_bar(coins.len() as u64, true);
                pb.set_message("Fetching prices...");
                let rows = compare::compare(&coins, prices, pb).await;
                if rows.is_empty() {
                    println!(
                        "{}",
                        ui::style_text("No prices available for those coins", ui::StyleType::Info)
                    );
                } else {
                    println!("{}", compare::display_as_table(&rows, formatter));
                }
            }
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => {
                debug!("Unknown dashboard command: {}", other);
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Unknown command: {other}. Try 'help'."),
                        ui::StyleType::Error
                    )
                );
            }
        }
    }

    Ok(())
}
