//! Account fetching
//!
//! Thin async wrappers that separate "account absent" (None) from
//! "account malformed" (decode error). State is fetched fresh on every
//! call - the program's atomic cost bound at submission time is the real
//! consistency check, so no snapshot is ever cached.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use tracing::debug;

use super::accounts::{BondingCurve, Global};
use crate::error::Result;

/// Fetch and decode the global config account
pub async fn fetch_global(
    rpc_client: &RpcClient,
    global_address: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<Option<Global>> {
    let response = rpc_client
        .get_account_with_commitment(global_address, commitment)
        .await?;

    match response.value {
        Some(account) => Ok(Some(Global::try_from_slice(&account.data)?)),
        None => Ok(None),
    }
}

/// Fetch and decode a bonding curve account.
///
/// A curve that was created moments ago may not be visible yet at the
/// primary commitment, so a miss retries once at the looser fallback level
/// before concluding the token does not exist.
pub async fn fetch_bonding_curve(
    rpc_client: &RpcClient,
    curve_address: &Pubkey,
    commitment: CommitmentConfig,
    fallback_commitment: CommitmentConfig,
) -> Result<Option<BondingCurve>> {
    let response = rpc_client
        .get_account_with_commitment(curve_address, commitment)
        .await?;

    if let Some(account) = response.value {
        return Ok(Some(BondingCurve::try_from_slice(&account.data)?));
    }

    debug!(
        "Bonding curve {} not visible at {:?}, retrying at {:?}",
        curve_address, commitment.commitment, fallback_commitment.commitment
    );

    let response = rpc_client
        .get_account_with_commitment(curve_address, fallback_commitment)
        .await?;

    match response.value {
        Some(account) => Ok(Some(BondingCurve::try_from_slice(&account.data)?)),
        None => Ok(None),
    }
}

/// Check whether an account exists at the given address
pub async fn account_exists(
    rpc_client: &RpcClient,
    address: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<bool> {
    let response = rpc_client
        .get_account_with_commitment(address, commitment)
        .await?;
    Ok(response.value.is_some())
}
