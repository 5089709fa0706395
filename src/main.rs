//! Curve trader - buy from a pump.fun bonding curve, burn tokens
//!
//! # WARNING
//! This tool trades with real money. Only use funds you can afford to lose.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use curve_trader::cli::commands;
use curve_trader::config::Config;

/// Bonding-curve trader
#[derive(Parser)]
#[command(name = "trade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// RPC endpoint override
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Buy a token from its bonding curve
    Buy {
        /// Token mint address
        mint: String,

        /// Amount of SOL to spend
        sol_amount: f64,

        /// Slippage tolerance in percent (default from config: 1)
        #[arg(long)]
        slippage: Option<u64>,

        /// Base58 private key (default: PRIVATE_KEY env var)
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },

    /// Burn tokens from the wallet's token account
    Burn {
        /// Token mint address
        mint: String,

        /// Amount to burn, in the token's smallest unit
        amount: u64,

        /// Base58 private key (default: PRIVATE_KEY env var)
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },

    /// Show current configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curve_trader=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc.endpoint = rpc_url;
    }
    debug!("Loaded configuration from {}", cli.config);

    match cli.command {
        Commands::Buy {
            mint,
            sol_amount,
            slippage,
            private_key,
        } => commands::buy(&config, &mint, sol_amount, slippage, private_key.as_deref()).await,
        Commands::Burn {
            mint,
            amount,
            private_key,
        } => commands::burn(&config, &mint, amount, private_key.as_deref()).await,
        Commands::Config => commands::show_config(&config),
    }
}
