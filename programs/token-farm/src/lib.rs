pub mod account_structs;
/// # token farm - Stake Token Farm
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Admin creates two token types: Stake (e.g., mock DAI), Reward (e.g., Dapp)
///    - Program upgrade authority initializes the farm and becomes its owner
///    - Stake and reward vault token accounts are handed to the farm authority PDA
///    - Owner funds the reward vault (or grants the farm mint authority over the
///      reward mint and initializes with mint_rewards)
///
/// 2. User Staking Flow:
///    - User approves the farm authority PDA as SPL delegate for the amount
///    - User stakes; the farm pulls the tokens into the stake vault
///    - A staker record tracks the staked balance and staking status
///
/// 3. Reward Issuance:
///    - Owner calls issue_tokens with (staker record, reward account) pairs
///    - Every staker still staking receives reward tokens 1:1 against their stake
///
/// 4. Unstaking:
///    - User unstakes and receives the whole staked balance back
///    - The staker record stays behind with a zero balance
///
/// Every instruction is atomic: a failed check reverts all token movements
/// made earlier in the same transaction.
pub mod error;
pub mod events;
mod guard;
pub mod ledger;
pub mod processor;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("Fxp1fRe4KDm3Bc4TrtigjVrRZc5CXRPJoiBi8PGq9Ly3");

#[program]
pub mod token_farm {
    use super::*;

    /// Creates the farm:
    /// - name: display name, at most 32 bytes (e.g., "Dapp Token Farm")
    /// - mint_rewards: mint rewards instead of paying them from the reward vault;
    ///   requires the reward mint's mint authority to already be the farm authority
    pub fn initialize(ctx: Context<Initialize>, name: String, mint_rewards: bool) -> Result<()> {
        processor::initialize(ctx, name, mint_rewards)
    }

    /// Stakes stake tokens:
    /// - Moves `amount` from the user into the stake vault via the user's approval
    /// - Increases the user's staking balance and marks them as staking
    pub fn stake_tokens(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
        processor::stake_tokens(ctx, amount)
    }

    /// Returns the user's whole staking balance and clears the staking flag
    pub fn unstake_tokens(ctx: Context<UnstakeTokens>) -> Result<()> {
        processor::unstake_tokens(ctx)
    }

    /// Owner only. Pays each staker in `remaining_accounts` reward tokens equal
    /// to their staking balance.
    pub fn issue_tokens<'info>(
        ctx: Context<'_, '_, 'info, 'info, IssueTokens<'info>>,
    ) -> Result<()> {
        processor::issue_tokens(ctx)
    }

    pub fn staking_balance(ctx: Context<ReadStaker>, participant: Pubkey) -> Result<u64> {
        processor::staking_balance(ctx, participant)
    }

    pub fn is_staking(ctx: Context<ReadStaker>, participant: Pubkey) -> Result<bool> {
        processor::is_staking(ctx, participant)
    }

    pub fn name(ctx: Context<ReadFarm>) -> Result<String> {
        processor::name(ctx)
    }
}
