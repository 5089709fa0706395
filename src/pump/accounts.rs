//! Pump.fun account structures
//!
//! # WARNING: These structures may change without notice
//! Pump.fun has modified their account layouts in the past.
//! If deserialization fails, these structures may need updating.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use super::program::ACCOUNT_DISCRIMINATORS;
use crate::error::{Error, Result};

/// BondingCurve account - stores the bonding curve state for a token
///
/// This account holds:
/// - Virtual reserves used for price calculation
/// - Real reserves (actual SOL and tokens held)
/// - Whether the bonding curve has completed (migrated off the curve)
/// - The token creator, whose vault collects the creator fee share
#[derive(Debug, Clone, BorshDeserialize, BorshSerialize)]
pub struct BondingCurve {
    /// Account discriminator (first 8 bytes)
    /// Should match ACCOUNT_DISCRIMINATORS::BONDING_CURVE
    _discriminator: [u8; 8],

    /// Virtual token reserves for price calculation
    pub virtual_token_reserves: u64,

    /// Virtual SOL reserves for price calculation
    /// This is larger than real_sol_reserves and affects pricing
    pub virtual_sol_reserves: u64,

    /// Real token reserves (actual tokens held in bonding curve)
    pub real_token_reserves: u64,

    /// Real SOL reserves (actual SOL held in bonding curve)
    pub real_sol_reserves: u64,

    /// Total supply of the token
    pub token_total_supply: u64,

    /// Whether the bonding curve is complete (market migrated)
    pub complete: bool,

    /// Creator of the token, owner of the creator vault
    pub creator: Pubkey,
}

impl BondingCurve {
    /// Fixed prefix size: discriminator + 5 u64 words + bool + creator
    pub const SIZE: usize = 8 + 5 * 8 + 1 + 32;

    /// Create a new BondingCurve for testing
    #[cfg(test)]
    pub fn new_for_test(
        virtual_token_reserves: u64,
        virtual_sol_reserves: u64,
        complete: bool,
        creator: Pubkey,
    ) -> Self {
        Self {
            _discriminator: ACCOUNT_DISCRIMINATORS::BONDING_CURVE,
            virtual_token_reserves,
            virtual_sol_reserves,
            real_token_reserves: virtual_token_reserves,
            real_sol_reserves: 0,
            token_total_supply: 1_000_000_000_000_000,
            complete,
            creator,
        }
    }

    /// Deserialize from account data
    ///
    /// Buffers longer than SIZE are accepted (pump.fun has appended fields
    /// before); shorter ones are a format error, never a zero-fill.
    pub fn try_from_slice(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::AccountDecode(format!(
                "BondingCurve data too short: {} bytes, expected at least {}",
                data.len(),
                Self::SIZE
            )));
        }

        let discriminator: [u8; 8] = data[..8]
            .try_into()
            .map_err(|_| Error::AccountDecode("Invalid discriminator".to_string()))?;

        if discriminator != ACCOUNT_DISCRIMINATORS::BONDING_CURVE {
            return Err(Error::AccountDecode(format!(
                "Wrong discriminator for BondingCurve: expected {:?}, got {:?}",
                ACCOUNT_DISCRIMINATORS::BONDING_CURVE,
                discriminator
            )));
        }

        let mut slice = &data[..Self::SIZE];
        BorshDeserialize::deserialize(&mut slice)
            .map_err(|e| Error::AccountDecode(format!("Borsh decode failed: {}", e)))
    }
}

/// Global configuration account
#[derive(Debug, Clone, BorshDeserialize, BorshSerialize)]
pub struct Global {
    _discriminator: [u8; 8],
    pub initialized: bool,
    pub authority: Pubkey,
    pub fee_recipient: Pubkey,
    pub initial_virtual_token_reserves: u64,
    pub initial_virtual_sol_reserves: u64,
    pub initial_real_token_reserves: u64,
    pub token_total_supply: u64,
    pub fee_basis_points: u64,
}

impl Global {
    /// Fixed prefix size: discriminator + bool + 2 pubkeys + 5 u64 words
    pub const SIZE: usize = 8 + 1 + 2 * 32 + 5 * 8;

    #[cfg(test)]
    pub fn new_for_test(fee_recipient: Pubkey, fee_basis_points: u64) -> Self {
        Self {
            _discriminator: ACCOUNT_DISCRIMINATORS::GLOBAL,
            initialized: true,
            authority: Pubkey::new_unique(),
            fee_recipient,
            initial_virtual_token_reserves: 1_073_000_000_000_000,
            initial_virtual_sol_reserves: 30_000_000_000,
            initial_real_token_reserves: 793_100_000_000_000,
            token_total_supply: 1_000_000_000_000_000,
            fee_basis_points,
        }
    }

    pub fn try_from_slice(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::AccountDecode(format!(
                "Global data too short: {} bytes, expected at least {}",
                data.len(),
                Self::SIZE
            )));
        }

        let discriminator: [u8; 8] = data[..8]
            .try_into()
            .map_err(|_| Error::AccountDecode("Invalid discriminator".to_string()))?;

        if discriminator != ACCOUNT_DISCRIMINATORS::GLOBAL {
            return Err(Error::AccountDecode(format!(
                "Wrong discriminator for Global: expected {:?}, got {:?}",
                ACCOUNT_DISCRIMINATORS::GLOBAL,
                discriminator
            )));
        }

        let mut slice = &data[..Self::SIZE];
        let global: Global = BorshDeserialize::deserialize(&mut slice)
            .map_err(|e| Error::AccountDecode(format!("Borsh decode failed: {}", e)))?;

        // Fee rate invariant: basis points never exceed 100%
        if global.fee_basis_points > 10_000 {
            return Err(Error::AccountDecode(format!(
                "Global fee_basis_points out of range: {}",
                global.fee_basis_points
            )));
        }

        Ok(global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: BorshSerialize>(value: &T) -> Vec<u8> {
        borsh::to_vec(value).unwrap()
    }

    #[test]
    fn test_bonding_curve_decode() {
        let creator = Pubkey::new_unique();
        let curve = BondingCurve::new_for_test(1_073_000_000_000_000, 30_000_000_000, false, creator);

        let data = encode(&curve);
        assert_eq!(data.len(), BondingCurve::SIZE);

        let decoded = BondingCurve::try_from_slice(&data).unwrap();
        assert_eq!(decoded.virtual_token_reserves, 1_073_000_000_000_000);
        assert_eq!(decoded.virtual_sol_reserves, 30_000_000_000);
        assert!(!decoded.complete);
        assert_eq!(decoded.creator, creator);
    }

    #[test]
    fn test_bonding_curve_tolerates_trailing_bytes() {
        let curve =
            BondingCurve::new_for_test(1_000, 2_000, true, Pubkey::new_unique());
        let mut data = encode(&curve);
        data.extend_from_slice(&[0u8; 17]);

        let decoded = BondingCurve::try_from_slice(&data).unwrap();
        assert!(decoded.complete);
    }

    #[test]
    fn test_truncated_buffer_is_format_error() {
        let curve = BondingCurve::new_for_test(1_000, 2_000, false, Pubkey::new_unique());
        let data = encode(&curve);

        let err = BondingCurve::try_from_slice(&data[..BondingCurve::SIZE - 1]).unwrap_err();
        assert!(matches!(err, Error::AccountDecode(_)));
    }

    #[test]
    fn test_wrong_discriminator_rejected() {
        let curve = BondingCurve::new_for_test(1_000, 2_000, false, Pubkey::new_unique());
        let mut data = encode(&curve);
        data[0] ^= 0xff;

        assert!(matches!(
            BondingCurve::try_from_slice(&data),
            Err(Error::AccountDecode(_))
        ));
    }

    #[test]
    fn test_global_decode() {
        let fee_recipient = Pubkey::new_unique();
        let global = Global::new_for_test(fee_recipient, 100);

        let data = encode(&global);
        assert_eq!(data.len(), Global::SIZE);

        let decoded = Global::try_from_slice(&data).unwrap();
        assert!(decoded.initialized);
        assert_eq!(decoded.fee_recipient, fee_recipient);
        assert_eq!(decoded.fee_basis_points, 100);
    }

    #[test]
    fn test_global_rejects_fee_above_100_percent() {
        let global = Global::new_for_test(Pubkey::new_unique(), 10_001);
        let data = encode(&global);

        assert!(matches!(
            Global::try_from_slice(&data),
            Err(Error::AccountDecode(_))
        ));
    }
}
