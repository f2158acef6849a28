use anchor_lang::prelude::*;

#[error_code]
pub enum FarmErrorCode {
    #[msg("Invalid amount")]
    InvalidAmount = 1,
    #[msg("Insufficient stake token balance")]
    InsufficientFunds = 2,
    #[msg("Farm is not approved to move this amount")]
    InsufficientAllowance = 3,
    #[msg("Nothing staked")]
    NothingStaked = 4,
    #[msg("Caller is not the farm owner")]
    Unauthorized = 5,

    #[msg("Invalid mint provided")]
    InvalidMint = 6,
    #[msg("Invalid vault")]
    InvalidVault = 7,
    #[msg("Invalid vault authority")]
    InvalidVaultAuthority = 8,
    #[msg("Invalid mint authority")]
    InvalidMintAuthority = 9,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 10,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 11,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 12,
    #[msg("Farm name is too long")]
    NameTooLong = 13,
    #[msg("Stake mint and reward mint cannot be the same")]
    MintsCannotBeSame = 14,

    #[msg("Remaining accounts must be (staker record, reward token account) pairs")]
    InvalidRemainingAccounts = 15,
    #[msg("Invalid staker record")]
    InvalidStakerRecord = 16,
    #[msg("Invalid reward token account")]
    InvalidRewardAccount = 17,
    #[msg("Staker listed more than once")]
    DuplicateStaker = 18,
    #[msg("Insufficient reward vault balance")]
    InsufficientRewardBalance = 19,
    #[msg("Math overflow")]
    MathOverflow = 20,
}
