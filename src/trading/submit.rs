//! Transaction submission and confirmation
//!
//! The boundary to the network client: sign, transmit, block until the
//! client reports confirmation at its configured commitment. No retry or
//! backoff of its own - a failed submission is returned to the caller.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Sign the instruction sequence with `payer` and submit it, waiting for
/// confirmation
pub async fn send_and_confirm(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &Keypair,
) -> Result<Signature> {
    let recent_blockhash = rpc_client
        .get_latest_blockhash()
        .await
        .map_err(|e| Error::Rpc(format!("Failed to fetch blockhash: {}", e)))?;

    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        &[payer],
        recent_blockhash,
    );

    debug!(
        "Submitting transaction with {} instructions",
        instructions.len()
    );

    let signature = rpc_client
        .send_and_confirm_transaction(&transaction)
        .await
        .map_err(|e| Error::TransactionSend(e.to_string()))?;

    info!("Transaction confirmed: {}", signature);
    Ok(signature)
}
