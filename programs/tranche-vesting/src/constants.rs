//! Program-wide constants.

/// Denominator for every fractional parameter (first unlock, batch1 share,
/// burn rate, fee share).
pub const PERMILLE: u64 = 1_000;

/// Max beneficiaries stored in the beneficiaries PDA.
pub const MAX_BENEFICIARIES: usize = 64;

/// Max entries accepted by one `whitelist` call.
pub const MAX_WHITELIST_BATCH: usize = 16;

/// Max wallets processed per `eliminate` / `collect_fees` call.
pub const MAX_BATCH: usize = 16;

pub const STATE_SEED: &[u8] = b"vesting_state";
pub const BENEFICIARIES_SEED: &[u8] = b"beneficiaries";
pub const VAULT_SEED: &[u8] = b"vault";
