use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard::{require_owner, validate_program_update_authority};
use crate::ledger::{
    check_batch_len, check_farm_setup, check_reward_account, check_stake, check_staker_record,
    plan_rewards, staker_view, FarmSetup, StakerView,
};
use crate::state::{StakerRecord, FARM_AUTHORITY_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, MintTo, TokenAccount, Transfer};

pub fn initialize(ctx: Context<Initialize>, name: String, mint_rewards: bool) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    let farm_authority = ctx.accounts.farm_authority.key();
    check_farm_setup(&FarmSetup {
        name: &name,
        stake_mint: ctx.accounts.stake_mint.key(),
        reward_mint: ctx.accounts.reward_mint.key(),
        mint_rewards,
        reward_mint_authority: ctx.accounts.reward_mint.mint_authority.into(),
        farm_authority,
        stake_vault_amount: ctx.accounts.stake_vault.amount,
    })?;

    let farm = &mut ctx.accounts.farm;
    farm.owner = ctx.accounts.signer.key();
    farm.stake_mint = ctx.accounts.stake_mint.key();
    farm.reward_mint = ctx.accounts.reward_mint.key();
    farm.name = name;
    farm.mint_rewards = mint_rewards;
    farm.total_staked = 0;
    farm.staker_count = 0;
    farm.total_rewards_issued = 0;
    farm.bump = ctx.bumps.farm;
    farm.authority_bump = ctx.bumps.farm_authority;

    // Hand both vaults to the farm authority PDA unless they already belong to it.
    for vault in [&ctx.accounts.stake_vault, &ctx.accounts.reward_vault] {
        if vault.owner == ctx.accounts.signer.key() {
            token::set_authority(
                CpiContext::new(
                    ctx.accounts.token_program.to_account_info(),
                    token::SetAuthority {
                        account_or_mint: vault.to_account_info(),
                        current_authority: ctx.accounts.signer.to_account_info(),
                    },
                ),
                AuthorityType::AccountOwner,
                Some(farm_authority),
            )?;
        }
    }

    msg!("Farm '{}' initialized", ctx.accounts.farm.name);
    emit!(FarmInitialized {
        owner: ctx.accounts.farm.owner,
        stake_mint: ctx.accounts.farm.stake_mint,
        reward_mint: ctx.accounts.farm.reward_mint,
        mint_rewards,
    });

    Ok(())
}

pub fn stake_tokens(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
    let farm_key = ctx.accounts.farm.key();
    let signer_key = ctx.accounts.signer.key();
    let user_account = &ctx.accounts.user_stake_token_account;
    check_stake(
        amount,
        user_account.amount,
        user_account.delegate.into(),
        user_account.delegated_amount,
        &ctx.accounts.farm_authority.key(),
    )?;

    let record = &mut ctx.accounts.staker_record;
    if record.has_staked {
        require_keys_eq!(record.farm, farm_key, FarmErrorCode::InvalidStakerRecord);
        require_keys_eq!(record.owner, signer_key, FarmErrorCode::InvalidStakerRecord);
    } else {
        record.owner = signer_key;
        record.farm = farm_key;
        record.bump = ctx.bumps.staker_record;
    }
    let first_stake = record.deposit(amount)?;
    let staking_balance = record.staking_balance;
    ctx.accounts.farm.record_stake(amount, first_stake)?;

    // The farm authority spends the staker's approval as SPL delegate.
    let seeds: &[&[u8]] = &[FARM_AUTHORITY_SEED, &[ctx.accounts.farm.authority_bump]];
    let signer = &[&seeds[..]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_stake_token_account.to_account_info(),
        to: ctx.accounts.stake_vault.to_account_info(),
        authority: ctx.accounts.farm_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        amount,
    )?;

    emit!(StakeEvent {
        user: signer_key,
        amount,
        staking_balance,
        mint: ctx.accounts.farm.stake_mint,
        vault: ctx.accounts.stake_vault.key(),
    });

    Ok(())
}

pub fn unstake_tokens(ctx: Context<UnstakeTokens>) -> Result<()> {
    let amount = ctx.accounts.staker_record.withdraw_all()?;
    ctx.accounts.farm.record_unstake(amount)?;

    require!(
        ctx.accounts.stake_vault.amount >= amount,
        FarmErrorCode::InvalidVault
    );

    let seeds: &[&[u8]] = &[FARM_AUTHORITY_SEED, &[ctx.accounts.farm.authority_bump]];
    let signer = &[&seeds[..]];
    let transfer_accounts = Transfer {
        from: ctx.accounts.stake_vault.to_account_info(),
        to: ctx.accounts.user_stake_token_account.to_account_info(),
        authority: ctx.accounts.farm_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_accounts,
            signer,
        ),
        amount,
    )?;

    emit!(UnstakeEvent {
        user: ctx.accounts.signer.key(),
        amount,
        mint: ctx.accounts.farm.stake_mint,
        vault: ctx.accounts.stake_vault.key(),
    });

    Ok(())
}

pub fn issue_tokens<'info>(ctx: Context<'_, '_, 'info, 'info, IssueTokens<'info>>) -> Result<()> {
    require_owner(&ctx.accounts.farm, &ctx.accounts.signer.key())?;

    let pairs = ctx.remaining_accounts;
    check_batch_len(pairs.len())?;

    let farm_key = ctx.accounts.farm.key();
    let reward_mint = ctx.accounts.farm.reward_mint;
    let mut records = Vec::with_capacity(pairs.len() / 2);
    let mut reward_accounts = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks_exact(2) {
        let record = Account::<StakerRecord>::try_from(&pair[0])
            .map_err(|_| FarmErrorCode::InvalidStakerRecord)?;
        check_staker_record(pair[0].key, &record, &farm_key)?;
        let reward_account = Account::<TokenAccount>::try_from(&pair[1])
            .map_err(|_| FarmErrorCode::InvalidRewardAccount)?;
        check_reward_account(
            &record,
            &reward_account.mint,
            &reward_account.owner,
            &reward_mint,
        )?;
        records.push(record);
        reward_accounts.push(reward_account);
    }

    let minted = ctx.accounts.farm.mint_rewards;
    let available = (!minted).then_some(ctx.accounts.reward_vault.amount);
    let plan = plan_rewards(records.iter().map(|r| &**r), available)?;

    let seeds: &[&[u8]] = &[FARM_AUTHORITY_SEED, &[ctx.accounts.farm.authority_bump]];
    let signer = &[&seeds[..]];
    for payout in &plan.payouts {
        let to = reward_accounts[payout.index].to_account_info();
        if minted {
            let cpi_accounts = MintTo {
                mint: ctx.accounts.reward_mint.to_account_info(),
                to,
                authority: ctx.accounts.farm_authority.to_account_info(),
            };
            token::mint_to(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    cpi_accounts,
                    signer,
                ),
                payout.amount,
            )?;
        } else {
            let cpi_accounts = Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to,
                authority: ctx.accounts.farm_authority.to_account_info(),
            };
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    cpi_accounts,
                    signer,
                ),
                payout.amount,
            )?;
        }

        emit!(RewardIssued {
            user: payout.staker,
            amount: payout.amount,
            mint: reward_mint,
        });
    }

    ctx.accounts.farm.record_rewards(plan.total)?;

    msg!(
        "Issued {} reward tokens to {} of {} stakers",
        plan.total,
        plan.payouts.len(),
        records.len()
    );
    emit!(RewardsDistributed {
        admin: ctx.accounts.signer.key(),
        stakers: plan.payouts.len() as u64,
        total: plan.total,
        minted,
    });

    Ok(())
}

pub fn staking_balance(ctx: Context<ReadStaker>, _participant: Pubkey) -> Result<u64> {
    Ok(read_staker(&ctx.accounts)?.staking_balance)
}

pub fn is_staking(ctx: Context<ReadStaker>, _participant: Pubkey) -> Result<bool> {
    Ok(read_staker(&ctx.accounts)?.is_staking)
}

pub fn name(ctx: Context<ReadFarm>) -> Result<String> {
    Ok(ctx.accounts.farm.name.clone())
}

// An empty account at the staker PDA belongs to a participant who never staked.
fn read_staker(accounts: &ReadStaker) -> Result<StakerView> {
    let info = accounts.staker_record.to_account_info();
    if info.data_is_empty() {
        return staker_view(None, &accounts.farm.key());
    }
    require_keys_eq!(*info.owner, crate::ID, FarmErrorCode::InvalidStakerRecord);
    let data = info.try_borrow_data()?;
    let record = StakerRecord::try_deserialize(&mut &data[..])
        .map_err(|_| FarmErrorCode::InvalidStakerRecord)?;
    staker_view(Some(&record), &accounts.farm.key())
}
