use anchor_lang::prelude::*;

#[event]
pub struct FarmInitialized {
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub mint_rewards: bool,
}

#[event]
pub struct StakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub staking_balance: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,
}

#[event]
pub struct UnstakeEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,
}

#[event]
pub struct RewardIssued {
    pub user: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
}

#[event]
pub struct RewardsDistributed {
    pub admin: Pubkey,
    pub stakers: u64,
    pub total: u64,
    pub minted: bool,
}
