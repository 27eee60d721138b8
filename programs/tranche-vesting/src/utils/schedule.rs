//! Schedule calculator: pure functions from (config, beneficiary snapshot,
//! time) to vested amounts. No mutation, no I/O.
//!
//! Linear ticks are counted from the first second of linear accrual: once
//! `linear_vested_time > 0`, tick `k` is released after `k - 1` full periods.

use crate::constants::PERMILLE;
use crate::error::VestingError;
use crate::state::{Beneficiary, ScheduleConfig};
use crate::utils::math::{mul_div, permille_of};

/// Reference clock of a beneficiary. Elimination freezes it permanently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingClock {
    Live,
    FrozenAt(i64),
}

impl VestingClock {
    pub fn reference_time(self, now: i64) -> i64 {
        match self {
            VestingClock::Live => now,
            VestingClock::FrozenAt(ts) => ts,
        }
    }

    pub fn is_frozen(self) -> bool {
        matches!(self, VestingClock::FrozenAt(_))
    }
}

fn clock_delay(cfg: &ScheduleConfig, for_batch2: bool) -> i64 {
    if for_batch2 {
        cfg.batch2_delay
    } else {
        0
    }
}

/// Seconds since start (minus the batch2 delay when requested), floored at 0.
pub fn vested_time(cfg: &ScheduleConfig, at: i64, for_batch2: bool) -> i64 {
    at.saturating_sub(cfg.start_time)
        .saturating_sub(clock_delay(cfg, for_batch2))
        .max(0)
}

pub fn linear_vested_time(cfg: &ScheduleConfig, at: i64, for_batch2: bool) -> i64 {
    vested_time(cfg, at, for_batch2)
        .saturating_sub(cfg.linear_vesting_offset)
        .max(0)
}

pub fn linear_unlocks_passed(cfg: &ScheduleConfig, at: i64, for_batch2: bool) -> u32 {
    let linear = linear_vested_time(cfg, at, for_batch2);
    if linear == 0 || cfg.linear_vesting_period <= 0 {
        return 0;
    }
    let passed = (linear / cfg.linear_vesting_period).saturating_add(1);
    passed.min(i64::from(cfg.linear_unlocks_count)) as u32
}

/// Cumulative amount of `total` vested at `at` on the chosen clock.
pub fn vesting_schedule(
    cfg: &ScheduleConfig,
    total: u64,
    at: i64,
    for_batch2: bool,
) -> Result<u64, VestingError> {
    if at < cfg.start_time.saturating_add(clock_delay(cfg, for_batch2)) {
        return Ok(0);
    }
    let first_unlock = permille_of(total, cfg.first_unlock_permille)?;
    if cfg.linear_unlocks_count == 0 {
        return Ok(first_unlock);
    }
    let linear_pool = total
        .checked_sub(first_unlock)
        .ok_or(VestingError::MathOverflow)?;
    let linear = mul_div(
        linear_pool,
        u64::from(linear_unlocks_passed(cfg, at, for_batch2)),
        u64::from(cfg.linear_unlocks_count),
    )?;
    Ok(first_unlock
        .checked_add(linear)
        .ok_or(VestingError::MathOverflow)?
        .min(total))
}

/// `vesting_schedule` of a beneficiary on its own (possibly frozen) clock.
pub fn beneficiary_schedule(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
    for_batch2: bool,
) -> Result<u64, VestingError> {
    let at = entry.clock().reference_time(now);
    vesting_schedule(cfg, entry.total_allocation, at, for_batch2)
}

/// Everything the claim engine needs about one beneficiary at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Schedule on the undelayed clock.
    pub vested: u64,
    /// Schedule on the clock batch2 follows for this beneficiary.
    pub vested_batch2_clock: u64,
    /// Vested and not yet consumed.
    pub unlocked: u64,
    pub unlocked_batch1: u64,
    pub unlocked_batch2: u64,
    /// Part of `unlocked` that batch2's delayed clock has not released yet.
    pub batch2_early: u64,
    /// Allocation neither vested nor consumed.
    pub unvested: u64,
    /// Net amount receivable by releasing `unvested` early.
    pub locked: u64,
}

impl Position {
    /// Amount claimable without penalty.
    pub fn min_claimable(&self) -> u64 {
        self.unlocked_batch1 + self.unlocked_batch2
    }

    /// Upper bound of `extra_amount` for an early-release claim.
    pub fn max_extra(&self) -> Result<u64, VestingError> {
        self.batch2_early
            .checked_add(self.locked)
            .ok_or(VestingError::MathOverflow)
    }
}

/// Pro-rata split of early releases, fees and burns between the batches.
/// Batch2 takes the rounding remainder.
fn attributed_deductions(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
) -> Result<(u64, u64), VestingError> {
    let penalty_fee = entry
        .total_fee
        .checked_sub(entry.forfeited)
        .ok_or(VestingError::MathOverflow)?;
    let deducted = entry
        .claimed_from_locked
        .checked_add(penalty_fee)
        .and_then(|v| v.checked_add(entry.total_burned))
        .ok_or(VestingError::MathOverflow)?;
    let batch1 = permille_of(deducted, cfg.batch1_permille)?;
    Ok((batch1, deducted - batch1))
}

pub fn position(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
) -> Result<Position, VestingError> {
    let clock = entry.clock();
    let at = clock.reference_time(now);
    let total = entry.total_allocation;

    let vested = vesting_schedule(cfg, total, at, false)?;
    // An eliminated beneficiary keeps what had vested on the undelayed clock.
    let vested_batch2_clock = if entry.has_batch2_delay && !clock.is_frozen() {
        vesting_schedule(cfg, total, at, true)?
    } else {
        vested
    };

    let consumed = entry.consumed()?;
    let headroom = total.saturating_sub(consumed);
    let unlocked = vested
        .saturating_sub(consumed.saturating_sub(entry.forfeited))
        .min(headroom);

    let entitled_batch1 = permille_of(vested, cfg.batch1_permille)?;
    let entitled_batch2 =
        vested_batch2_clock - permille_of(vested_batch2_clock, cfg.batch1_permille)?;
    let (deducted1, deducted2) = attributed_deductions(cfg, entry)?;

    let mut unlocked_batch1 = entitled_batch1
        .saturating_sub(entry.claimed_batch1)
        .saturating_sub(deducted1);
    let mut unlocked_batch2 = entitled_batch2
        .saturating_sub(entry.claimed_batch2)
        .saturating_sub(deducted2);

    // Never hand out more than is unlocked overall; trim batch2 first.
    let excess = unlocked_batch1
        .saturating_add(unlocked_batch2)
        .saturating_sub(unlocked);
    if excess > 0 {
        let from_batch2 = excess.min(unlocked_batch2);
        unlocked_batch2 -= from_batch2;
        unlocked_batch1 -= excess - from_batch2;
    }

    let batch2_early = unlocked - unlocked_batch1 - unlocked_batch2;
    let unvested = headroom - unlocked;

    let locked = if at < cfg.start_time.saturating_add(cfg.locked_claimable_offset) {
        0
    } else {
        // Room for the batch2-early penalty is reserved before the locked pool.
        mul_div(
            unvested.saturating_sub(batch2_early),
            PERMILLE.saturating_sub(u64::from(cfg.burn_rate)),
            PERMILLE,
        )?
    };

    Ok(Position {
        vested,
        vested_batch2_clock,
        unlocked,
        unlocked_batch1,
        unlocked_batch2,
        batch2_early,
        unvested,
        locked,
    })
}

pub fn unlocked(cfg: &ScheduleConfig, entry: &Beneficiary, now: i64) -> Result<u64, VestingError> {
    Ok(position(cfg, entry, now)?.unlocked)
}

pub fn unlocked_batch1(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
) -> Result<u64, VestingError> {
    Ok(position(cfg, entry, now)?.unlocked_batch1)
}

pub fn unlocked_batch2(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
) -> Result<u64, VestingError> {
    Ok(position(cfg, entry, now)?.unlocked_batch2)
}

pub fn locked(cfg: &ScheduleConfig, entry: &Beneficiary, now: i64) -> Result<u64, VestingError> {
    Ok(position(cfg, entry, now)?.locked)
}

/// Portion of the entry's fee released to the operator by `now`, on the live
/// undelayed clock. The registration fee vests pro rata with the allocation
/// (or at once when `initial_fee_vests` is off). Forfeitures and penalties
/// come off the unvested top of the allocation, so they are released only
/// once the schedule passes `T - part`.
pub fn vested_fee(cfg: &ScheduleConfig, entry: &Beneficiary, now: i64) -> Result<u64, VestingError> {
    let total = entry.total_allocation;
    let initial = entry.initial_fee.min(entry.total_fee);
    let top = entry.total_fee - initial;
    if total == 0 {
        return Ok(if cfg.initial_fee_vests { 0 } else { initial });
    }
    let vested = vesting_schedule(cfg, total, now, false)?;
    let initial_released = if cfg.initial_fee_vests {
        mul_div(initial, vested, total)?
    } else {
        initial
    };
    let top_released = vested.saturating_sub(total.saturating_sub(top)).min(top);
    initial_released
        .checked_add(top_released)
        .ok_or(VestingError::MathOverflow)
}

pub fn collectible_fee(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
) -> Result<u64, VestingError> {
    Ok(vested_fee(cfg, entry, now)?.saturating_sub(entry.fee_collected))
}
