//! Price calculation for pump.fun bonding curves
//!
//! Constant product formula over virtual reserves, fee taken on the input
//! side before the swap. All curve math is integer-only; u128 intermediates
//! keep the reserve products from overflowing.

use super::accounts::BondingCurve;
use crate::error::{Error, Result};

/// SOL decimals (lamports)
pub const SOL_DECIMALS: u8 = 9;

/// Fee denominator: basis points per 100%
const BPS_DENOMINATOR: u64 = 10_000;

/// Calculate how many tokens a buy of `sol_in` lamports yields.
///
/// `fee = floor(sol_in * fee_basis_points / 10000)` comes off the input,
/// then `x * y = k` applies over the virtual reserves. The result is
/// strictly less than the virtual token reserves for any positive input.
pub fn tokens_out(curve: &BondingCurve, sol_in: u64, fee_basis_points: u64) -> Result<u64> {
    if curve.virtual_sol_reserves == 0 || curve.virtual_token_reserves == 0 {
        return Err(Error::PriceOverflow);
    }

    let fee = (sol_in as u128)
        .checked_mul(fee_basis_points as u128)
        .ok_or(Error::PriceOverflow)?
        / BPS_DENOMINATOR as u128;

    // Cannot happen for fee rates <= 10000 bps, but an oversized rate must
    // surface as an invariant violation rather than wrap
    let net_sol_in = sol_in
        .checked_sub(fee as u64)
        .ok_or(Error::PriceOverflow)?;

    // New SOL reserves after buy
    let new_sol_reserves = curve
        .virtual_sol_reserves
        .checked_add(net_sol_in)
        .ok_or(Error::PriceOverflow)?;

    // k = virtual_sol * virtual_token
    let k = (curve.virtual_sol_reserves as u128)
        .checked_mul(curve.virtual_token_reserves as u128)
        .ok_or(Error::PriceOverflow)?;

    // new_token_reserves = k / new_sol_reserves, rounded down
    let new_token_reserves = k
        .checked_div(new_sol_reserves as u128)
        .ok_or(Error::PriceOverflow)?;

    // Tokens received = old_token_reserves - new_token_reserves
    let out = (curve.virtual_token_reserves as u128)
        .checked_sub(new_token_reserves)
        .ok_or(Error::PriceOverflow)?;

    Ok(out as u64)
}

/// Maximum acceptable cost for a buy: `sol_in * (1 + slippage/100)`, floor.
/// The on-chain program enforces this bound atomically; locally it is only
/// used for the balance precheck.
pub fn max_sol_cost_with_slippage(sol_in: u64, slippage_percent: u64) -> Result<u64> {
    let scaled = (sol_in as u128)
        .checked_mul(100 + slippage_percent as u128)
        .ok_or(Error::PriceOverflow)?
        / 100;

    u64::try_from(scaled).map_err(|_| Error::PriceOverflow)
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / 10f64.powi(SOL_DECIMALS as i32)
}

/// Convert SOL to lamports
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * 10f64.powi(SOL_DECIMALS as i32)) as u64
}

/// Convert token amount to human-readable (with decimals)
pub fn tokens_to_human(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn test_curve() -> BondingCurve {
        BondingCurve::new_for_test(
            1_073_000_000_000_000, // virtual_token_reserves
            30_000_000_000,        // virtual_sol_reserves: 30 SOL
            false,
            Pubkey::new_unique(),
        )
    }

    #[test]
    fn test_reference_vector() {
        // 0.05 SOL buy at 100bps fee against a fresh curve
        let curve = test_curve();
        let out = tokens_out(&curve, 50_000_000, 100).unwrap();

        // fee = 500_000, net = 49_500_000, new_vsol = 30_049_500_000
        // new_vtok = floor(30e9 * 1_073e12 / 30_049_500_000) = 1_071_232_466_430_389
        assert_eq!(out, 1_767_533_569_611);
    }

    #[test]
    fn test_output_bounded_by_reserves() {
        let curve = test_curve();
        for sol_in in [1u64, 1_000, 50_000_000, u64::MAX / 2] {
            let out = tokens_out(&curve, sol_in, 100).unwrap();
            assert!(out < curve.virtual_token_reserves);
        }
    }

    #[test]
    fn test_monotonic_in_sol_in() {
        let curve = test_curve();
        let mut last = 0u64;
        for sol_in in [0u64, 1, 1_000_000, 2_000_000, 50_000_000, 1_000_000_000] {
            let out = tokens_out(&curve, sol_in, 100).unwrap();
            assert!(out >= last, "output decreased at sol_in={}", sol_in);
            last = out;
        }
    }

    #[test]
    fn test_zero_fee_matches_plain_constant_product() {
        let curve = test_curve();
        let out = tokens_out(&curve, 1_000_000_000, 0).unwrap();

        let k = curve.virtual_sol_reserves as u128 * curve.virtual_token_reserves as u128;
        let expected = curve.virtual_token_reserves as u128
            - k / (curve.virtual_sol_reserves as u128 + 1_000_000_000);
        assert_eq!(out as u128, expected);
    }

    #[test]
    fn test_oversized_fee_rate_is_invariant_violation() {
        let curve = test_curve();
        assert!(matches!(
            tokens_out(&curve, 100, 20_000),
            Err(Error::PriceOverflow)
        ));
    }

    #[test]
    fn test_empty_curve_rejected() {
        let curve = BondingCurve::new_for_test(0, 0, false, Pubkey::new_unique());
        assert!(matches!(
            tokens_out(&curve, 1_000, 100),
            Err(Error::PriceOverflow)
        ));
    }

    #[test]
    fn test_max_cost_slippage() {
        // 1% on 0.05 SOL
        assert_eq!(
            max_sol_cost_with_slippage(50_000_000, 1).unwrap(),
            50_500_000
        );
        // floor rounding
        assert_eq!(max_sol_cost_with_slippage(99, 1).unwrap(), 99);
        // 0% passes through
        assert_eq!(max_sol_cost_with_slippage(12_345, 0).unwrap(), 12_345);
    }

    #[test]
    fn test_lamports_conversion() {
        assert_eq!(lamports_to_sol(1_000_000_000), 1.0);
        assert_eq!(sol_to_lamports(1.0), 1_000_000_000);
    }
}
