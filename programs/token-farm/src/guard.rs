use crate::error::FarmErrorCode;
use crate::state::Farm;
use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

pub fn validate_program_update_authority(
    program_data_account: &UncheckedAccount,
    authority: &Signer,
) -> Result<()> {
    let program_data = program_data_account
        .try_borrow_data()
        .map_err(|_| FarmErrorCode::InvalidProgramData)?;

    let update_authority = upgrade_authority(&program_data)?;
    require_keys_eq!(
        authority.key(),
        update_authority,
        FarmErrorCode::InvalidUpgradeAuthority
    );
    Ok(())
}

/// Reads the upgrade authority out of an upgradeable loader `ProgramData` account.
#[allow(deprecated)]
pub fn upgrade_authority(program_data: &[u8]) -> Result<Pubkey> {
    let loader_state = bincode::deserialize::<UpgradeableLoaderState>(program_data)
        .map_err(|_| FarmErrorCode::InvalidProgramData)?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            slot: _,
            upgrade_authority_address,
        } => upgrade_authority_address.ok_or_else(|| FarmErrorCode::NoUpgradeAuthority.into()),
        _ => Err(FarmErrorCode::InvalidProgramData.into()),
    }
}

/// Owner-only gate for privileged farm operations.
pub fn require_owner(farm: &Farm, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, farm.owner, FarmErrorCode::Unauthorized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm_owned_by(owner: Pubkey) -> Farm {
        Farm {
            owner,
            stake_mint: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            name: "Dapp Token Farm".to_string(),
            mint_rewards: false,
            total_staked: 0,
            staker_count: 0,
            total_rewards_issued: 0,
            bump: 255,
            authority_bump: 254,
        }
    }

    #[test]
    fn owner_passes_gate() {
        let owner = Pubkey::new_unique();
        assert!(require_owner(&farm_owned_by(owner), &owner).is_ok());
    }

    #[test]
    fn non_owner_is_unauthorized() {
        let farm = farm_owned_by(Pubkey::new_unique());
        let investor = Pubkey::new_unique();
        assert_eq!(
            require_owner(&farm, &investor).unwrap_err(),
            FarmErrorCode::Unauthorized.into()
        );
    }

    #[test]
    #[allow(deprecated)]
    fn reads_upgrade_authority_from_program_data() {
        let authority = Pubkey::new_unique();
        let data = bincode::serialize(&UpgradeableLoaderState::ProgramData {
            slot: 42,
            upgrade_authority_address: Some(authority),
        })
        .unwrap();
        assert_eq!(upgrade_authority(&data).unwrap(), authority);
    }

    #[test]
    #[allow(deprecated)]
    fn immutable_program_has_no_upgrade_authority() {
        let data = bincode::serialize(&UpgradeableLoaderState::ProgramData {
            slot: 42,
            upgrade_authority_address: None,
        })
        .unwrap();
        assert_eq!(
            upgrade_authority(&data).unwrap_err(),
            FarmErrorCode::NoUpgradeAuthority.into()
        );
    }

    #[test]
    #[allow(deprecated)]
    fn program_account_is_not_program_data() {
        let data = bincode::serialize(&UpgradeableLoaderState::Program {
            programdata_address: Pubkey::new_unique(),
        })
        .unwrap();
        assert_eq!(
            upgrade_authority(&data).unwrap_err(),
            FarmErrorCode::InvalidProgramData.into()
        );
    }
}
