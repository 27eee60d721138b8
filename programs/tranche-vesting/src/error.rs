use anchor_lang::prelude::*;

/// Custom error codes for the tranche vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: owner signature required")]
    UnauthorizedOwner,

    #[msg("Unauthorized: owner or manager signature required")]
    UnauthorizedManager,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Burn rate must be in (0, 1000] permille")]
    InvalidBurnRate,

    #[msg("Whitelisting is no longer allowed")]
    WhitelistingClosed,

    #[msg("Some users are already whitelisted")]
    AlreadyWhitelisted,

    #[msg("Batched argument lengths differ")]
    BatchLengthMismatch,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Beneficiary list is full")]
    BeneficiaryListFull,

    #[msg("Invalid allocation (must be > 0 and cover the initial fee)")]
    InvalidAllocation,

    #[msg("Beneficiary not found")]
    BeneficiaryNotFound,

    #[msg("Eliminating before start")]
    EliminatingBeforeStart,

    #[msg("Some users are already eliminated")]
    AlreadyEliminated,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Requested claim amount > max claimable")]
    RequestExceedsMaxClaimable,

    #[msg("No fees to collect")]
    NothingToCollect,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Claimed, fee and burned would exceed the allocation")]
    AllocationExceeded,

    #[msg("Math overflow")]
    MathOverflow,
}
