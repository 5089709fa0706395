//! Pump.fun program constants and discriminators
//!
//! # WARNING: These constants may change without notice
//! Pump.fun has historically modified their program behavior.
//! If transactions start failing or parsing breaks, these values
//! may need to be updated.
//!
//! # How discriminators are calculated
//! Anchor uses the first 8 bytes of SHA-256("global:<instruction_name>")
//! as the instruction discriminator.

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Pump.fun program ID
/// WARNING: This may change if pump.fun deploys a new program version
pub const PUMP_PROGRAM_ID_STR: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

/// Pump.fun fee program ID - the fee config PDA lives under this program,
/// not under the market program itself
pub const PUMP_FEE_PROGRAM_ID_STR: &str = "pfeeUxB6jkeY1Hxd7CsFCAjcbHA9rWtchMGdZ6VojVZ";

lazy_static::lazy_static! {
    /// Pump.fun program ID as Pubkey
    pub static ref PUMP_PROGRAM_ID: Pubkey =
        Pubkey::from_str(PUMP_PROGRAM_ID_STR).expect("Invalid pump program ID");

    /// Pump.fun fee program ID as Pubkey
    pub static ref PUMP_FEE_PROGRAM_ID: Pubkey =
        Pubkey::from_str(PUMP_FEE_PROGRAM_ID_STR).expect("Invalid pump fee program ID");
}

/// Seeds used for PDA derivation against the market program
pub mod seeds {
    pub const GLOBAL_SEED: &[u8] = b"global";
    pub const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";
    pub const CREATOR_VAULT_SEED: &[u8] = b"creator-vault";
    pub const GLOBAL_VOLUME_ACCUMULATOR_SEED: &[u8] = b"global_volume_accumulator";
    pub const USER_VOLUME_ACCUMULATOR_SEED: &[u8] = b"user_volume_accumulator";
    pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";
    /// Under the fee program, combined with the market program id
    pub const FEE_CONFIG_SEED: &[u8] = b"fee_config";
}

/// Instruction discriminators (first 8 bytes of instruction data)
/// Calculated as: SHA-256("global:<instruction_name>")[0..8]
#[allow(non_snake_case)]
pub mod DISCRIMINATORS {
    /// Buy tokens instruction discriminator
    /// SHA-256("global:buy")[0..8]
    pub const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];
}

/// Account discriminators (first 8 bytes of account data)
/// Used to identify account types when parsing
#[allow(non_snake_case)]
pub mod ACCOUNT_DISCRIMINATORS {
    /// BondingCurve account discriminator
    pub const BONDING_CURVE: [u8; 8] = [23, 183, 248, 55, 96, 216, 172, 96];

    /// Global config account discriminator
    pub const GLOBAL: [u8; 8] = [167, 232, 232, 177, 200, 108, 114, 127];
}

/// Calculate instruction discriminator from name
/// This follows Anchor's convention: SHA-256("global:<name>")[0..8]
pub fn calculate_discriminator(name: &str) -> [u8; 8] {
    use sha2::{Digest, Sha256};

    let preimage = format!("global:{}", name);
    let hash = Sha256::digest(preimage.as_bytes());

    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_calculation() {
        // Verify our hardcoded discriminator matches the calculation
        assert_eq!(calculate_discriminator("buy"), DISCRIMINATORS::BUY);
    }

    #[test]
    fn test_program_id() {
        assert_eq!(
            PUMP_PROGRAM_ID.to_string(),
            "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P"
        );
    }

    #[test]
    fn test_fee_program_id_parses() {
        assert_eq!(PUMP_FEE_PROGRAM_ID.to_string(), PUMP_FEE_PROGRAM_ID_STR);
    }
}
