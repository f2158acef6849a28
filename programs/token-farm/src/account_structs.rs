use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = Farm::LEN,
        seeds = [FARM_SEED],
        bump
    )]
    pub farm: Account<'info, Farm>,

    /// CHECK: PDA that custodies both vaults and acts as the stakers' SPL delegate,
    /// validated by seeds constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED],
        bump
    )]
    pub farm_authority: UncheckedAccount<'info>,

    pub stake_mint: Account<'info, Mint>,
    pub reward_mint: Account<'info, Mint>,

    /// Holds staked tokens; must end up owned by farm_authority
    #[account(
        mut,
        constraint = stake_vault.mint == stake_mint.key() @ FarmErrorCode::InvalidMint,
        constraint = (stake_vault.owner == signer.key() || stake_vault.owner == farm_authority.key()) @ FarmErrorCode::InvalidVaultAuthority
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Holds reward tokens paid out by issue_tokens
    #[account(
        mut,
        constraint = reward_vault.mint == reward_mint.key() @ FarmErrorCode::InvalidMint,
        constraint = (reward_vault.owner == signer.key() || reward_vault.owner == farm_authority.key()) @ FarmErrorCode::InvalidVaultAuthority
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ FarmErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct StakeTokens<'info> {
    #[account(
        mut,
        seeds = [FARM_SEED],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// CHECK: PDA delegate for the staker's token account, validated by seeds constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED],
        bump = farm.authority_bump
    )]
    pub farm_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = farm.stake_mint,
        constraint = stake_vault.owner == farm_authority.key() @ FarmErrorCode::InvalidVaultAuthority
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = signer,
        space = StakerRecord::LEN,
        seeds = [STAKER_SEED, signer.key().as_ref()],
        bump
    )]
    pub staker_record: Account<'info, StakerRecord>,

    #[account(
        mut,
        constraint = user_stake_token_account.mint == farm.stake_mint @ FarmErrorCode::InvalidMint,
        constraint = user_stake_token_account.owner == signer.key()
    )]
    pub user_stake_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UnstakeTokens<'info> {
    #[account(
        mut,
        seeds = [FARM_SEED],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// CHECK: PDA vault authority, validated by seeds and token account owner constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED],
        bump = farm.authority_bump,
        constraint = farm_authority.key() == stake_vault.owner @ FarmErrorCode::InvalidVaultAuthority
    )]
    pub farm_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = farm.stake_mint,
        constraint = stake_vault.mint == farm.stake_mint @ FarmErrorCode::InvalidVault
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKER_SEED, signer.key().as_ref()],
        bump = staker_record.bump,
        has_one = farm @ FarmErrorCode::InvalidStakerRecord
    )]
    pub staker_record: Account<'info, StakerRecord>,

    #[account(
        mut,
        constraint = user_stake_token_account.mint == farm.stake_mint @ FarmErrorCode::InvalidMint,
        constraint = user_stake_token_account.owner == signer.key()
    )]
    pub user_stake_token_account: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Stakers travel in `remaining_accounts` as (staker record, reward token account) pairs.
#[derive(Accounts)]
pub struct IssueTokens<'info> {
    #[account(
        mut,
        seeds = [FARM_SEED],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// CHECK: PDA that owns the reward vault and may hold mint authority,
    /// validated by seeds constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED],
        bump = farm.authority_bump
    )]
    pub farm_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = reward_mint.key() == farm.reward_mint @ FarmErrorCode::InvalidMint
    )]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = farm.reward_mint,
        constraint = reward_vault.owner == farm_authority.key() @ FarmErrorCode::InvalidVaultAuthority
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct ReadStaker<'info> {
    #[account(
        seeds = [FARM_SEED],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// CHECK: staker PDA for `participant`, validated by seeds constraint; empty
    /// until the participant's first stake, deserialized by the handler otherwise
    #[account(
        seeds = [STAKER_SEED, participant.as_ref()],
        bump
    )]
    pub staker_record: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ReadFarm<'info> {
    #[account(
        seeds = [FARM_SEED],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}
