use anchor_lang::prelude::*;

pub const FARM_SEED: &[u8] = b"farm";
pub const FARM_AUTHORITY_SEED: &[u8] = b"farm_authority";
pub const STAKER_SEED: &[u8] = b"staker";

pub const MAX_NAME_LEN: usize = 32;

#[account]
pub struct Farm {
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub name: String,
    /// Rewards are minted by the farm authority instead of paid out of the reward vault.
    pub mint_rewards: bool,
    pub total_staked: u64,
    pub staker_count: u64,
    pub total_rewards_issued: u64,
    pub bump: u8,
    pub authority_bump: u8,
}

impl Farm {
    pub const LEN: usize = 8 + 32 + 32 + 32 + (4 + MAX_NAME_LEN) + 1 + 8 + 8 + 8 + 1 + 1;
}

#[account]
#[derive(Default)]
pub struct StakerRecord {
    pub owner: Pubkey,
    pub farm: Pubkey,
    pub staking_balance: u64,
    pub is_staking: bool,
    pub has_staked: bool, // set once, never cleared
    pub bump: u8,
}

impl StakerRecord {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 1 + 1 + 1;
}
