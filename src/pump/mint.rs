//! Mint account utilities
//!
//! The token program owning a mint is read from the mint account itself,
//! never assumed: pump.fun mints exist under both the legacy token program
//! and token-2022, and instructions referencing the wrong one are rejected
//! on chain.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::ID as TOKEN_2022_PROGRAM_ID;

use crate::error::{Error, Result};

/// Default decimals for pump.fun tokens
pub const DEFAULT_DECIMALS: u8 = 6;

/// Offset of the decimals byte in an SPL mint account
/// (after mint_authority COption and supply)
const DECIMALS_OFFSET: usize = 44;

/// What we need to know about a mint before building instructions
#[derive(Debug, Clone, Copy)]
pub struct MintInfo {
    /// The token program that owns the mint
    pub token_program: Pubkey,
    /// Decimals read from the mint account
    pub decimals: u8,
}

/// Fetch the mint account and read its owning token program and decimals.
///
/// Returns `Ok(None)` when the mint does not exist, so callers can report
/// "token not found" rather than a decode failure.
pub async fn fetch_mint_info(rpc_client: &RpcClient, mint: &Pubkey) -> Result<Option<MintInfo>> {
    let response = rpc_client
        .get_account_with_commitment(mint, rpc_client.commitment())
        .await?;

    let account = match response.value {
        Some(account) => account,
        None => return Ok(None),
    };

    ensure_supported_token_program(account.owner)?;

    // Mint account layout:
    // - mint_authority: COption<Pubkey> (36 bytes: 4 + 32)
    // - supply: u64 (8 bytes)
    // - decimals: u8 (1 byte)
    // - is_initialized: bool (1 byte)
    // - freeze_authority: COption<Pubkey> (36 bytes)
    if account.data.len() <= DECIMALS_OFFSET {
        return Err(Error::AccountDecode(
            "Mint account data too short".to_string(),
        ));
    }

    Ok(Some(MintInfo {
        token_program: account.owner,
        decimals: account.data[DECIMALS_OFFSET],
    }))
}

/// Reject owners that are neither token program - such an account is not a
/// mint at all
pub fn ensure_supported_token_program(program: Pubkey) -> Result<()> {
    if program == spl_token::id() || program == TOKEN_2022_PROGRAM_ID {
        Ok(())
    } else {
        Err(Error::UnsupportedTokenProgram(program))
    }
}
