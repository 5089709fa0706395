//! Buy and burn orchestration
//!
//! Each public entry point is one suspendable flow: read-only account
//! fetches, local precondition checks, instruction assembly, then a single
//! network write. Concurrent calls are not coordinated - every call works
//! from its own fresh snapshot and the on-chain cost bound is the final
//! arbiter.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pump::accounts::BondingCurve;
use crate::pump::program::PUMP_PROGRAM_ID;
use crate::pump::{fetch, mint, pda, price};
use crate::trading::{submit, transaction};

/// Lamports left untouched on top of the cost bound so the wallet can keep
/// paying network fees after the buy
pub const MIN_BALANCE_BUFFER_LAMPORTS: u64 = 5_000_000;

/// Result of a confirmed buy
#[derive(Debug, Clone)]
pub struct BuyOutcome {
    pub signature: Signature,
    /// Tokens expected from the curve snapshot, smallest units
    pub token_amount: u64,
    /// Lamports offered to the curve (fee included, before slippage bound)
    pub sol_spent: u64,
}

/// Result of a confirmed burn
#[derive(Debug, Clone)]
pub struct BurnOutcome {
    pub signature: Signature,
    pub amount_burned: u64,
}

/// Trader - owns the RPC connection, the signing key, and the resolved
/// program id. Configuration is threaded in explicitly; there is no
/// process-wide state.
pub struct Trader {
    rpc_client: Arc<RpcClient>,
    keypair: Keypair,
    program_id: Pubkey,
    slippage_percent: u64,
    priority_fee_micro_lamports: u64,
    commitment: CommitmentConfig,
    fallback_commitment: CommitmentConfig,
}

impl Trader {
    pub fn new(config: &Config, keypair: Keypair) -> Result<Self> {
        let commitment = parse_commitment(&config.rpc.commitment)?;
        let fallback_commitment = parse_commitment(&config.rpc.fallback_commitment)?;

        let program_id = if config.program.pump_program_id.is_empty() {
            *PUMP_PROGRAM_ID
        } else {
            config
                .program
                .pump_program_id
                .parse()
                .map_err(|e| Error::Config(format!("Invalid pump_program_id: {}", e)))?
        };

        let rpc_client = Arc::new(RpcClient::new_with_timeout_and_commitment(
            config.rpc.endpoint.clone(),
            Duration::from_millis(config.rpc.timeout_ms),
            commitment,
        ));

        Ok(Self {
            rpc_client,
            keypair,
            program_id,
            slippage_percent: config.trading.slippage_percent,
            priority_fee_micro_lamports: config.trading.priority_fee_micro_lamports,
            commitment,
            fallback_commitment,
        })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Buy from the bonding curve with `sol_amount` SOL.
    ///
    /// `slippage_percent` overrides the configured tolerance when given.
    pub async fn buy(
        &self,
        mint_address: &Pubkey,
        sol_amount: f64,
        slippage_percent: Option<u64>,
    ) -> Result<BuyOutcome> {
        let buyer = self.keypair.pubkey();
        let sol_in = price::sol_to_lamports(sol_amount);
        let slippage = slippage_percent.unwrap_or(self.slippage_percent);

        info!(
            "Buying {} SOL of {} (slippage {}%)",
            sol_amount, mint_address, slippage
        );

        // Global config: fee recipient and fee rate
        let (global_address, _) = pda::global(&self.program_id);
        let global = fetch::fetch_global(&self.rpc_client, &global_address, self.commitment)
            .await?
            .ok_or(Error::GlobalNotFound)?;

        // Curve snapshot, with one retry at the looser commitment for
        // freshly created markets
        let (curve_address, _) = pda::bonding_curve(&self.program_id, mint_address);
        let curve = fetch::fetch_bonding_curve(
            &self.rpc_client,
            &curve_address,
            self.commitment,
            self.fallback_commitment,
        )
        .await?
        .ok_or(Error::CurveNotFound(*mint_address))?;

        ensure_curve_active(mint_address, &curve)?;

        let token_amount = price::tokens_out(&curve, sol_in, global.fee_basis_points)?;
        let max_sol_cost = price::max_sol_cost_with_slippage(sol_in, slippage)?;

        debug!(
            "Curve snapshot: vtok={} vsol={} -> {} tokens, cost bound {}",
            curve.virtual_token_reserves, curve.virtual_sol_reserves, token_amount, max_sol_cost
        );

        // Fast-fail on funds before any write; the program re-checks
        // atomically at execution
        let balance = self.rpc_client.get_balance(&buyer).await?;
        let required = max_sol_cost
            .checked_add(MIN_BALANCE_BUFFER_LAMPORTS)
            .ok_or(Error::PriceOverflow)?;
        ensure_balance(balance, required)?;

        // Token program comes from the mint account, never assumed
        let mint_info = mint::fetch_mint_info(&self.rpc_client, mint_address)
            .await?
            .ok_or(Error::MintNotFound(*mint_address))?;

        debug!(
            "Mint owned by {}, expecting ~{} tokens",
            mint_info.token_program,
            price::tokens_to_human(token_amount, mint_info.decimals)
        );

        let accounts = transaction::BuyAccounts::derive(
            &self.program_id,
            mint_address,
            &buyer,
            &global.fee_recipient,
            &curve.creator,
            &mint_info.token_program,
        );

        let needs_token_account =
            !fetch::account_exists(&self.rpc_client, &accounts.associated_user, self.commitment)
                .await?;

        let instructions = transaction::assemble_buy(
            &accounts,
            token_amount,
            max_sol_cost,
            self.priority_fee_micro_lamports,
            needs_token_account,
        );

        let signature = submit::send_and_confirm(&self.rpc_client, &instructions, &self.keypair)
            .await?;

        info!(
            "Bought {} token units for up to {} lamports: {}",
            token_amount, max_sol_cost, signature
        );

        Ok(BuyOutcome {
            signature,
            token_amount,
            sol_spent: sol_in,
        })
    }

    /// Burn `amount` smallest units of `mint_address` from the wallet's
    /// token account. The caller applies decimals.
    pub async fn burn(&self, mint_address: &Pubkey, amount: u64) -> Result<BurnOutcome> {
        let owner = self.keypair.pubkey();

        info!("Burning {} units of {}", amount, mint_address);

        let mint_info = mint::fetch_mint_info(&self.rpc_client, mint_address)
            .await?
            .ok_or(Error::MintNotFound(*mint_address))?;

        let token_account =
            pda::associated_token_account(&owner, mint_address, &mint_info.token_program);

        if !fetch::account_exists(&self.rpc_client, &token_account, self.commitment).await? {
            return Err(Error::NothingToBurn(*mint_address));
        }

        let instructions = transaction::assemble_burn(
            &mint_info.token_program,
            &token_account,
            mint_address,
            &owner,
            amount,
            self.priority_fee_micro_lamports,
        )?;

        let signature = submit::send_and_confirm(&self.rpc_client, &instructions, &self.keypair)
            .await?;

        info!("Burned {} units: {}", amount, signature);

        Ok(BurnOutcome {
            signature,
            amount_burned: amount,
        })
    }
}

/// Reject curves that have migrated off the market
fn ensure_curve_active(mint: &Pubkey, curve: &BondingCurve) -> Result<()> {
    if curve.complete {
        return Err(Error::CurveComplete(*mint));
    }
    Ok(())
}

/// Reject buys the wallet cannot cover with the fee buffer intact
fn ensure_balance(available: u64, required: u64) -> Result<()> {
    if available < required {
        return Err(Error::InsufficientBalance {
            available,
            required,
        });
    }
    Ok(())
}

fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    CommitmentConfig::from_str(level)
        .map_err(|e| Error::Config(format!("Invalid commitment '{}': {:?}", level, e)))
}
