//! Deterministic sub-account derivation
//!
//! Pure functions over `Pubkey::find_program_address` - no I/O, no caching.
//! Every address the buy instruction references is recomputed on demand so
//! the instruction always matches what the on-chain program derives itself.

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address_with_program_id;

use super::program::seeds;

/// Derive the bonding curve PDA for a mint
pub fn bonding_curve(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::BONDING_CURVE_SEED, mint.as_ref()], program_id)
}

/// Derive the global config PDA
pub fn global(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::GLOBAL_SEED], program_id)
}

/// Derive the global volume accumulator PDA
pub fn global_volume_accumulator(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::GLOBAL_VOLUME_ACCUMULATOR_SEED], program_id)
}

/// Derive the per-user volume accumulator PDA
pub fn user_volume_accumulator(program_id: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::USER_VOLUME_ACCUMULATOR_SEED, user.as_ref()],
        program_id,
    )
}

/// Derive the creator vault PDA for a curve creator
pub fn creator_vault(program_id: &Pubkey, creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::CREATOR_VAULT_SEED, creator.as_ref()], program_id)
}

/// Derive the event authority PDA
pub fn event_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::EVENT_AUTHORITY_SEED], program_id)
}

/// Derive the fee config PDA. Lives under the fee program, seeded with the
/// market program id.
pub fn fee_config(fee_program_id: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::FEE_CONFIG_SEED, program_id.as_ref()],
        fee_program_id,
    )
}

/// Derive the associated token account for a wallet, under the token program
/// that owns the mint
pub fn associated_token_account(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Pubkey {
    get_associated_token_address_with_program_id(wallet, mint, token_program)
}
