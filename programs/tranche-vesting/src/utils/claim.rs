//! Claim planning: turns a beneficiary position and a requested extra amount
//! into per-bucket draws and the penalty split. Pure; the ledger applies the
//! resulting plan.

use crate::constants::PERMILLE;
use crate::error::VestingError;
use crate::state::{Beneficiary, ScheduleConfig};
use crate::utils::math::{add, mul_div_ceil, permille_of};
use crate::utils::schedule::position;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimPlan {
    pub from_batch1: u64,
    /// Includes `from_batch2_early`.
    pub from_batch2: u64,
    pub from_batch2_early: u64,
    pub from_locked: u64,
    /// Total transferred to the beneficiary.
    pub amount: u64,
    /// Penalty booked as collectible fee.
    pub fee: u64,
    /// Penalty burned from the vault.
    pub burned: u64,
}

/// Plans a claim of everything unlocked plus `extra_amount` drawn first from
/// the batch2-early bucket, then from the locked pool.
pub fn plan_claim(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    extra_amount: u64,
    now: i64,
) -> Result<ClaimPlan, VestingError> {
    let pos = position(cfg, entry, now)?;
    if extra_amount > pos.max_extra()? {
        return Err(VestingError::RequestExceedsMaxClaimable);
    }

    let from_batch2_early = extra_amount.min(pos.batch2_early);
    let from_locked = extra_amount - from_batch2_early;
    let amount = add(pos.min_claimable(), extra_amount)?;
    if amount == 0 {
        return Err(VestingError::NothingToClaim);
    }

    // Batch2 released early forfeits the same amount again; locked tokens
    // forfeit the burn-rate share of their gross value.
    let locked_penalty = if from_locked == 0 {
        0
    } else {
        let burn_rate = u64::from(cfg.burn_rate);
        mul_div_ceil(from_locked, burn_rate, PERMILLE.saturating_sub(burn_rate))?
    };

    let claimed_after = add(entry.total_claimed, amount)?;
    let headroom = entry
        .total_allocation
        .saturating_sub(add(add(claimed_after, entry.total_fee)?, entry.total_burned)?);
    let penalty = add(from_batch2_early, locked_penalty)?.min(headroom);
    let fee = permille_of(penalty, cfg.fee_share_permille)?;

    Ok(ClaimPlan {
        from_batch1: pos.unlocked_batch1,
        from_batch2: add(pos.unlocked_batch2, from_batch2_early)?,
        from_batch2_early,
        from_locked,
        amount,
        fee,
        burned: penalty - fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn plain_claim_takes_both_unlocked_batches() {
        let cfg = daily_config(800);
        let plan = plan_claim(&cfg, &beneficiary(5_000, true), 0, at_days(160)).unwrap();
        assert_eq!(plan.from_batch1, 726 * UNIT);
        assert_eq!(plan.from_batch2, 700 * UNIT);
        assert_eq!(plan.amount, 1_426 * UNIT);
        assert_eq!(plan.fee + plan.burned, 0);
    }

    #[test]
    fn nothing_before_start() {
        let cfg = daily_config(800);
        let res = plan_claim(&cfg, &beneficiary(5_000, true), 0, START - 1);
        assert!(matches!(res, Err(VestingError::NothingToClaim)));
    }

    #[test]
    fn extra_beyond_pools_is_rejected() {
        let cfg = daily_config(800);
        // max extra = 14 (batch2 early) + (3980 - 14) * 20% (locked)
        let entry = beneficiary(5_000, true);
        let res = plan_claim(&cfg, &entry, 1_000 * UNIT, at_days(90));
        assert!(matches!(res, Err(VestingError::RequestExceedsMaxClaimable)));
        assert!(plan_claim(&cfg, &entry, 807_200_000, at_days(90)).is_ok());
        let res = plan_claim(&cfg, &entry, 807_200_001, at_days(90));
        assert!(matches!(res, Err(VestingError::RequestExceedsMaxClaimable)));
    }

    #[test]
    fn draw_order_batch2_early_then_locked() {
        let cfg = daily_config(800);
        let plan = plan_claim(&cfg, &beneficiary(5_000, true), 114 * UNIT, at_days(90)).unwrap();
        assert_eq!(plan.from_batch2_early, 14 * UNIT);
        assert_eq!(plan.from_locked, 100 * UNIT);
        assert_eq!(plan.from_batch2, 714 * UNIT);
        assert_eq!(plan.amount, 1_120 * UNIT);
        // 14 forfeited for batch2 + 400 for the locked draw (gross 500)
        assert_eq!(plan.fee, 414 * UNIT);
        assert_eq!(plan.burned, 0);
    }

    #[test]
    fn penalty_split_between_fee_and_burn() {
        let mut cfg = daily_config(800);
        cfg.fee_share_permille = 250;
        let plan = plan_claim(&cfg, &beneficiary(5_000, true), 114 * UNIT, at_days(90)).unwrap();
        assert_eq!(plan.fee, 103_500_000);
        assert_eq!(plan.burned, 310_500_000);

        cfg.fee_share_permille = 0;
        let plan = plan_claim(&cfg, &beneficiary(5_000, true), 114 * UNIT, at_days(90)).unwrap();
        assert_eq!(plan.fee, 0);
        assert_eq!(plan.burned, 414 * UNIT);
    }

    #[test]
    fn penalty_truncated_to_remaining_allocation() {
        let cfg = daily_config(800);
        let mut entry = beneficiary(5_000, true);
        entry.total_claimed = 1_120 * UNIT;
        entry.claimed_batch1 = 306 * UNIT;
        entry.claimed_batch2 = 714 * UNIT;
        entry.claimed_from_locked = 100 * UNIT;
        entry.total_fee = 414 * UNIT;

        let plan = plan_claim(&cfg, &entry, 1_000 * UNIT, at_days(290)).unwrap();
        assert_eq!(plan.amount, 3_220 * UNIT);
        // Only 5000 - 4340 - 414 is left for the 1000 penalty.
        assert_eq!(plan.fee, 246 * UNIT);
    }

    #[test]
    fn full_burn_rate_allows_only_unlocked() {
        let cfg = daily_config(1_000);
        let entry = beneficiary(5_000, false);
        let res = plan_claim(&cfg, &entry, UNIT, at_days(90));
        assert!(matches!(res, Err(VestingError::RequestExceedsMaxClaimable)));

        let plan = plan_claim(&cfg, &entry, 0, at_days(90)).unwrap();
        assert_eq!(plan.amount, 1_020 * UNIT);
        assert_eq!(plan.from_locked, 0);
    }
}
