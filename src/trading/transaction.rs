//! Instruction assembly for buys and burns
//!
//! Produces ordered, unsigned instruction sequences. Order is part of the
//! contract: priority-fee directive first, optional token-account creation
//! second, market action last. The on-chain program reads accounts by
//! position, so the meta lists here must match its ABI exactly.

use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;

use crate::error::{Error, Result};
use crate::pump::pda;
use crate::pump::program::{DISCRIMINATORS, PUMP_FEE_PROGRAM_ID};

/// The full account set referenced by a buy instruction, in ABI order
#[derive(Debug, Clone)]
pub struct BuyAccounts {
    pub global: Pubkey,
    pub fee_recipient: Pubkey,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub associated_user: Pubkey,
    pub user: Pubkey,
    pub token_program: Pubkey,
    pub creator_vault: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,
    pub global_volume_accumulator: Pubkey,
    pub user_volume_accumulator: Pubkey,
    pub fee_config: Pubkey,
    pub fee_program: Pubkey,
}

impl BuyAccounts {
    /// Derive every sub-account a buy references.
    ///
    /// `fee_recipient` comes from the decoded global config, `creator` from
    /// the decoded bonding curve, `token_program` from the mint's owner.
    pub fn derive(
        program_id: &Pubkey,
        mint: &Pubkey,
        user: &Pubkey,
        fee_recipient: &Pubkey,
        creator: &Pubkey,
        token_program: &Pubkey,
    ) -> Self {
        let (global, _) = pda::global(program_id);
        let (bonding_curve, _) = pda::bonding_curve(program_id, mint);
        let (creator_vault, _) = pda::creator_vault(program_id, creator);
        let (event_authority, _) = pda::event_authority(program_id);
        let (global_volume_accumulator, _) = pda::global_volume_accumulator(program_id);
        let (user_volume_accumulator, _) = pda::user_volume_accumulator(program_id, user);
        let (fee_config, _) = pda::fee_config(&PUMP_FEE_PROGRAM_ID, program_id);

        Self {
            global,
            fee_recipient: *fee_recipient,
            mint: *mint,
            bonding_curve,
            associated_bonding_curve: pda::associated_token_account(
                &bonding_curve,
                mint,
                token_program,
            ),
            associated_user: pda::associated_token_account(user, mint, token_program),
            user: *user,
            token_program: *token_program,
            creator_vault,
            event_authority,
            program: *program_id,
            global_volume_accumulator,
            user_volume_accumulator,
            fee_config,
            fee_program: *PUMP_FEE_PROGRAM_ID,
        }
    }
}

/// Priority-fee directive. Always the first instruction; the compute price
/// is fixed per call, never tuned dynamically.
pub fn priority_fee_instruction(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
}

/// Create the buyer's token account for the mint. Idempotent variant so a
/// race with another creator cannot fail the transaction.
pub fn create_token_account_instruction(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    create_associated_token_account_idempotent(payer, owner, mint, token_program)
}

/// Build the buy instruction: discriminator + amount + max_sol_cost,
/// all little-endian.
pub fn buy_instruction(accounts: &BuyAccounts, token_amount: u64, max_sol_cost: u64) -> Instruction {
    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&DISCRIMINATORS::BUY);
    data.extend_from_slice(&token_amount.to_le_bytes());
    data.extend_from_slice(&max_sol_cost.to_le_bytes());

    // Order matters! Must match the program's account list exactly
    let metas = vec![
        AccountMeta::new_readonly(accounts.global, false),
        AccountMeta::new(accounts.fee_recipient, false),
        AccountMeta::new_readonly(accounts.mint, false),
        AccountMeta::new(accounts.bonding_curve, false),
        AccountMeta::new(accounts.associated_bonding_curve, false),
        AccountMeta::new(accounts.associated_user, false),
        AccountMeta::new(accounts.user, true),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(accounts.token_program, false),
        AccountMeta::new(accounts.creator_vault, false),
        AccountMeta::new_readonly(accounts.event_authority, false),
        AccountMeta::new_readonly(accounts.program, false),
        AccountMeta::new(accounts.global_volume_accumulator, false),
        AccountMeta::new(accounts.user_volume_accumulator, false),
        AccountMeta::new_readonly(accounts.fee_config, false),
        AccountMeta::new_readonly(accounts.fee_program, false),
    ];

    Instruction {
        program_id: accounts.program,
        accounts: metas,
        data,
    }
}

/// Build a burn instruction under whichever token program owns the mint.
/// The owner is the sole signer; amount is in the token's smallest unit.
pub fn burn_instruction(
    token_program: &Pubkey,
    token_account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    spl_token_2022::instruction::burn(token_program, token_account, mint, owner, &[], amount)
        .map_err(|e| Error::TransactionBuild(format!("burn instruction: {}", e)))
}

/// Assemble the ordered buy sequence:
/// [priority-fee, (create token account), buy]
pub fn assemble_buy(
    accounts: &BuyAccounts,
    token_amount: u64,
    max_sol_cost: u64,
    priority_fee_micro_lamports: u64,
    needs_token_account: bool,
) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(3);
    instructions.push(priority_fee_instruction(priority_fee_micro_lamports));

    if needs_token_account {
        instructions.push(create_token_account_instruction(
            &accounts.user,
            &accounts.user,
            &accounts.mint,
            &accounts.token_program,
        ));
    }

    instructions.push(buy_instruction(accounts, token_amount, max_sol_cost));
    instructions
}

/// Assemble the ordered burn sequence: [priority-fee, burn]
pub fn assemble_burn(
    token_program: &Pubkey,
    token_account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    priority_fee_micro_lamports: u64,
) -> Result<Vec<Instruction>> {
    Ok(vec![
        priority_fee_instruction(priority_fee_micro_lamports),
        burn_instruction(token_program, token_account, mint, owner, amount)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pump::program::PUMP_PROGRAM_ID;
    use solana_sdk::compute_budget;

    fn sample_accounts() -> BuyAccounts {
        BuyAccounts::derive(
            &PUMP_PROGRAM_ID,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &spl_token::id(),
        )
    }

    #[test]
    fn test_buy_payload_layout() {
        let accounts = sample_accounts();
        let ix = buy_instruction(&accounts, 1_767_533_569_611, 50_500_000);

        assert_eq!(ix.program_id, *PUMP_PROGRAM_ID);
        assert_eq!(&ix.data[..8], &DISCRIMINATORS::BUY);
        assert_eq!(
            u64::from_le_bytes(ix.data[8..16].try_into().unwrap()),
            1_767_533_569_611
        );
        assert_eq!(
            u64::from_le_bytes(ix.data[16..24].try_into().unwrap()),
            50_500_000
        );
    }

    #[test]
    fn test_buy_account_order_and_roles() {
        let accounts = sample_accounts();
        let ix = buy_instruction(&accounts, 1, 1);

        assert_eq!(ix.accounts.len(), 16);
        assert_eq!(ix.accounts[0].pubkey, accounts.global);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, accounts.fee_recipient);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[3].pubkey, accounts.bonding_curve);
        assert!(ix.accounts[3].is_writable);
        // The buyer is the only signer and pays SOL
        assert_eq!(ix.accounts[6].pubkey, accounts.user);
        assert!(ix.accounts[6].is_signer);
        assert!(ix.accounts[6].is_writable);
        assert_eq!(ix.accounts.iter().filter(|m| m.is_signer).count(), 1);
        assert_eq!(ix.accounts[7].pubkey, system_program::ID);
        assert_eq!(ix.accounts[9].pubkey, accounts.creator_vault);
        assert_eq!(ix.accounts[12].pubkey, accounts.global_volume_accumulator);
        assert!(ix.accounts[12].is_writable);
        assert_eq!(ix.accounts[13].pubkey, accounts.user_volume_accumulator);
        assert!(ix.accounts[13].is_writable);
        assert_eq!(ix.accounts[14].pubkey, accounts.fee_config);
        assert_eq!(ix.accounts[15].pubkey, accounts.fee_program);
    }

    #[test]
    fn test_buy_sequence_order_with_account_creation() {
        let accounts = sample_accounts();
        let instructions = assemble_buy(&accounts, 1_000, 2_000, 100_000, true);

        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].program_id, compute_budget::id());
        assert_eq!(
            instructions[1].program_id,
            spl_associated_token_account::id()
        );
        assert_eq!(instructions[2].program_id, *PUMP_PROGRAM_ID);
    }

    #[test]
    fn test_buy_sequence_skips_creation_when_account_exists() {
        let accounts = sample_accounts();
        let instructions = assemble_buy(&accounts, 1_000, 2_000, 100_000, false);

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, compute_budget::id());
        assert_eq!(instructions[1].program_id, *PUMP_PROGRAM_ID);
    }

    #[test]
    fn test_burn_sequence() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let token_account = pda::associated_token_account(&owner, &mint, &spl_token::id());

        let instructions = assemble_burn(
            &spl_token::id(),
            &token_account,
            &mint,
            &owner,
            1_000_000,
            100_000,
        )
        .unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, compute_budget::id());

        let burn = &instructions[1];
        assert_eq!(burn.program_id, spl_token::id());
        assert_eq!(burn.accounts[0].pubkey, token_account);
        assert_eq!(burn.accounts[1].pubkey, mint);
        assert_eq!(burn.accounts[2].pubkey, owner);
        assert!(burn.accounts[2].is_signer);
        assert_eq!(burn.accounts.iter().filter(|m| m.is_signer).count(), 1);
    }

    #[test]
    fn test_derive_uses_token_program_for_atas() {
        let mint = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let fee_recipient = Pubkey::new_unique();
        let creator = Pubkey::new_unique();

        let legacy = BuyAccounts::derive(
            &PUMP_PROGRAM_ID,
            &mint,
            &user,
            &fee_recipient,
            &creator,
            &spl_token::id(),
        );
        let t22 = BuyAccounts::derive(
            &PUMP_PROGRAM_ID,
            &mint,
            &user,
            &fee_recipient,
            &creator,
            &spl_token_2022::id(),
        );

        // PDAs under the market program are unaffected by the token standard
        assert_eq!(legacy.bonding_curve, t22.bonding_curve);
        // but both token accounts follow the owning program
        assert_ne!(legacy.associated_user, t22.associated_user);
        assert_ne!(legacy.associated_bonding_curve, t22.associated_bonding_curve);
    }
}
