//! CLI command implementations

use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::config::Config;
use crate::pump::price;
use crate::trading::Trader;
use crate::wallet;

/// Buy a token from its bonding curve
pub async fn buy(
    config: &Config,
    mint: &str,
    sol_amount: f64,
    slippage_percent: Option<u64>,
    private_key: Option<&str>,
) -> Result<()> {
    let mint: Pubkey = mint
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid mint address: {}", e))?;

    if sol_amount <= 0.0 {
        anyhow::bail!("sol_amount must be positive");
    }

    let keypair = wallet::load_keypair(private_key)?;
    let trader = Trader::new(config, keypair)?;
    info!("Buyer wallet: {}", trader.pubkey());

    let outcome = match trader.buy(&mint, sol_amount, slippage_percent).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_precondition() => {
            anyhow::bail!("Buy aborted before submission: {}", e)
        }
        Err(e) => return Err(e.into()),
    };
    info!(
        "Spent {} SOL",
        price::lamports_to_sol(outcome.sol_spent)
    );

    println!(
        "{}",
        serde_json::json!({
            "signature": outcome.signature.to_string(),
            "token_amount": outcome.token_amount,
            "sol_spent": outcome.sol_spent,
        })
    );

    Ok(())
}

/// Burn tokens from the wallet's token account
pub async fn burn(
    config: &Config,
    mint: &str,
    amount: u64,
    private_key: Option<&str>,
) -> Result<()> {
    let mint: Pubkey = mint
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid mint address: {}", e))?;

    if amount == 0 {
        anyhow::bail!("amount must be positive");
    }

    let keypair = wallet::load_keypair(private_key)?;
    let trader = Trader::new(config, keypair)?;
    info!("Owner wallet: {}", trader.pubkey());

    let outcome = match trader.burn(&mint, amount).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_precondition() => {
            anyhow::bail!("Burn aborted before submission: {}", e)
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        serde_json::json!({
            "signature": outcome.signature.to_string(),
            "amount_burned": outcome.amount_burned,
        })
    );

    Ok(())
}

/// Show current configuration (secrets masked)
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}
