use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coindash::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coindash::AppCommand {
    fn from(cmd: Commands) -> coindash::AppCommand {
        match cmd {
            Commands::Price { coin } => coindash::AppCommand::Price { coin },
            Commands::Compare { ids } => coindash::AppCommand::Compare { ids },
            Commands::Dashboard => coindash::AppCommand::Dashboard,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the current price of a coin
    Price {
        /// Coin identifier, e.g. bitcoin
        coin: String,
    },
    /// Compare prices across coins
    Compare {
        /// Comma-separated coin identifiers, e.g. "bitcoin, ethereum"
        ids: Option<String>,
    },
    /// Start an interactive portfolio session
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => coindash::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = coindash::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
provider:
  base_url: "https://api.coingecko.com"

secondary_currency:
  code: "PKR"
  symbol: "Rs"
  rate_per_usd: 280.0

cache_ttl_secs: 60
request_timeout_secs: 10
default_compare_ids: "bitcoin, ethereum, dogecoin"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
