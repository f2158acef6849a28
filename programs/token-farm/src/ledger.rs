//! Account-level bookkeeping for the farm.
//!
//! Everything here works on already-loaded account data and touches no CPI or
//! sysvar, so the processor calls it after account validation and before any
//! token moves. A failing check therefore leaves no partial state behind.

use std::collections::BTreeSet;

use crate::error::FarmErrorCode;
use crate::state::{Farm, StakerRecord, MAX_NAME_LEN, STAKER_SEED};
use anchor_lang::prelude::*;

/// Checks a stake request against the participant's stake token account.
///
/// The farm moves tokens as the SPL delegate of the participant's account, so
/// the approval must name the farm authority and cover `amount`.
pub fn check_stake(
    amount: u64,
    balance: u64,
    delegate: Option<Pubkey>,
    delegated_amount: u64,
    farm_authority: &Pubkey,
) -> Result<()> {
    require!(amount > 0, FarmErrorCode::InvalidAmount);
    require!(balance >= amount, FarmErrorCode::InsufficientFunds);

    let approved = match delegate {
        Some(spender) if spender == *farm_authority => delegated_amount,
        _ => 0,
    };
    require!(approved >= amount, FarmErrorCode::InsufficientAllowance);
    Ok(())
}

/// Farm parameters as seen by `initialize`.
pub struct FarmSetup<'a> {
    pub name: &'a str,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub mint_rewards: bool,
    pub reward_mint_authority: Option<Pubkey>,
    pub farm_authority: Pubkey,
    pub stake_vault_amount: u64,
}

pub fn check_farm_setup(setup: &FarmSetup) -> Result<()> {
    require!(setup.name.len() <= MAX_NAME_LEN, FarmErrorCode::NameTooLong);
    require_keys_neq!(
        setup.stake_mint,
        setup.reward_mint,
        FarmErrorCode::MintsCannotBeSame
    );
    if setup.mint_rewards {
        require!(
            setup.reward_mint_authority == Some(setup.farm_authority),
            FarmErrorCode::InvalidMintAuthority
        );
    }
    // custody must start equal to the (empty) sum of staking balances
    require!(setup.stake_vault_amount == 0, FarmErrorCode::InvalidVault);
    Ok(())
}

/// Issuance accounts come in (staker record, reward token account) pairs.
pub fn check_batch_len(len: usize) -> Result<()> {
    require!(len % 2 == 0, FarmErrorCode::InvalidRemainingAccounts);
    Ok(())
}

/// A record is accepted only at its own PDA and only for this farm.
pub fn check_staker_record(record_key: &Pubkey, record: &StakerRecord, farm: &Pubkey) -> Result<()> {
    let expected = Pubkey::create_program_address(
        &[STAKER_SEED, record.owner.as_ref(), &[record.bump]],
        &crate::id(),
    )
    .map_err(|_| FarmErrorCode::InvalidStakerRecord)?;
    require_keys_eq!(expected, *record_key, FarmErrorCode::InvalidStakerRecord);
    require_keys_eq!(record.farm, *farm, FarmErrorCode::InvalidStakerRecord);
    Ok(())
}

/// Rewards for `record` may only land in the staker's own reward token account.
pub fn check_reward_account(
    record: &StakerRecord,
    account_mint: &Pubkey,
    account_owner: &Pubkey,
    reward_mint: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*account_mint, *reward_mint, FarmErrorCode::InvalidRewardAccount);
    require_keys_eq!(*account_owner, record.owner, FarmErrorCode::InvalidRewardAccount);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StakerView {
    pub staking_balance: u64,
    pub is_staking: bool,
}

/// Read view of a participant. A participant without a record has never
/// staked and reads as zero balance, not staking.
pub fn staker_view(record: Option<&StakerRecord>, farm: &Pubkey) -> Result<StakerView> {
    match record {
        None => Ok(StakerView::default()),
        Some(record) => {
            require_keys_eq!(record.farm, *farm, FarmErrorCode::InvalidStakerRecord);
            Ok(StakerView {
                staking_balance: record.staking_balance,
                is_staking: record.is_staking,
            })
        }
    }
}

impl StakerRecord {
    /// Credits a stake. Returns `true` on the participant's first ever stake.
    pub fn deposit(&mut self, amount: u64) -> Result<bool> {
        self.staking_balance = self
            .staking_balance
            .checked_add(amount)
            .ok_or(FarmErrorCode::MathOverflow)?;
        self.is_staking = true;

        let first = !self.has_staked;
        self.has_staked = true;
        Ok(first)
    }

    /// Releases the whole staked balance.
    pub fn withdraw_all(&mut self) -> Result<u64> {
        require!(self.staking_balance > 0, FarmErrorCode::NothingStaked);
        let amount = std::mem::take(&mut self.staking_balance);
        self.is_staking = false;
        Ok(amount)
    }

    /// Rewards are paid 1:1 against the staked balance.
    pub fn reward_due(&self) -> u64 {
        if self.is_staking {
            self.staking_balance
        } else {
            0
        }
    }
}

impl Farm {
    pub fn record_stake(&mut self, amount: u64, first_stake: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(FarmErrorCode::MathOverflow)?;
        if first_stake {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(FarmErrorCode::MathOverflow)?;
        }
        Ok(())
    }

    pub fn record_unstake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn record_rewards(&mut self, total: u64) -> Result<()> {
        self.total_rewards_issued = self
            .total_rewards_issued
            .checked_add(total)
            .ok_or(FarmErrorCode::MathOverflow)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    /// Position of the staker in the issuance batch.
    pub index: usize,
    pub staker: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewardPlan {
    pub payouts: Vec<Payout>,
    pub total: u64,
}

/// Builds the payouts for one issuance batch.
///
/// `available` is the reward vault balance, or `None` when the farm mints
/// rewards. Records that are not staking are skipped without error.
pub fn plan_rewards<'a>(
    stakers: impl IntoIterator<Item = &'a StakerRecord>,
    available: Option<u64>,
) -> Result<RewardPlan> {
    let mut seen = BTreeSet::new();
    let mut plan = RewardPlan::default();

    for (index, record) in stakers.into_iter().enumerate() {
        require!(seen.insert(record.owner), FarmErrorCode::DuplicateStaker);

        let amount = record.reward_due();
        if amount == 0 {
            continue;
        }
        plan.total = plan
            .total
            .checked_add(amount)
            .ok_or(FarmErrorCode::MathOverflow)?;
        plan.payouts.push(Payout {
            index,
            staker: record.owner,
            amount,
        });
    }

    if let Some(available) = available {
        require!(
            plan.total <= available,
            FarmErrorCode::InsufficientRewardBalance
        );
    }
    Ok(plan)
}
