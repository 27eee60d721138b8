use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARIES_SEED, STATE_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, Beneficiary, ScheduleConfig, VestingState};
use crate::utils::schedule::{
    linear_unlocks_passed, linear_vested_time, position, vested_time, vesting_schedule,
};

/// Read-only view of one beneficiary at `now`. Unknown wallets read as zero.
pub fn build_quote(
    cfg: &ScheduleConfig,
    entry: &Beneficiary,
    now: i64,
) -> std::result::Result<VestingQuote, VestingError> {
    let clock = entry.clock();
    let at = clock.reference_time(now);
    let pos = position(cfg, entry, now)?;
    let next_unlock_at = if clock.is_frozen() {
        0
    } else {
        next_unlock_at(cfg, now)
    };

    Ok(VestingQuote {
        wallet: entry.wallet,
        now,
        eliminated_at: entry.eliminated_at,
        vested_time: vested_time(cfg, at, false),
        vested_time_batch2: vested_time(cfg, at, true),
        linear_vested_time: linear_vested_time(cfg, at, false),
        linear_vested_time_batch2: linear_vested_time(cfg, at, true),
        linear_unlocks_passed: linear_unlocks_passed(cfg, at, false),
        linear_unlocks_passed_batch2: linear_unlocks_passed(cfg, at, true),
        vesting_schedule: vesting_schedule(cfg, entry.total_allocation, at, false)?,
        vesting_schedule_batch2: vesting_schedule(cfg, entry.total_allocation, at, true)?,
        unlocked: pos.unlocked,
        unlocked_batch1: pos.unlocked_batch1,
        unlocked_batch2: pos.unlocked_batch2,
        locked: pos.locked,
        min_claimable: pos.min_claimable(),
        max_claimable: pos
            .min_claimable()
            .checked_add(pos.max_extra()?)
            .ok_or(VestingError::MathOverflow)?,
        total_claimed: entry.total_claimed,
        total_fee: entry.total_fee,
        total_burned: entry.total_burned,
        next_unlock_at,
    })
}

/// Next time the undelayed schedule grows, or 0 once it is complete.
fn next_unlock_at(cfg: &ScheduleConfig, now: i64) -> i64 {
    if now < cfg.start_time {
        return cfg.start_time;
    }
    let passed = linear_unlocks_passed(cfg, now, false);
    if passed >= cfg.linear_unlocks_count {
        return 0;
    }
    let linear_start = cfg.start_time.saturating_add(cfg.linear_vesting_offset);
    if passed == 0 {
        linear_start.saturating_add(1)
    } else {
        linear_start.saturating_add(cfg.linear_vesting_period.saturating_mul(i64::from(passed)))
    }
}

pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, wallet: Pubkey) -> Result<()> {
    let st = &ctx.accounts.vesting_state;
    let now = Clock::get()?.unix_timestamp;
    let entry = ctx.accounts.beneficiaries.snapshot(&wallet);
    let quote = build_quote(&st.config, &entry, now)?;
    emit!(quote);
    Ok(())
}

#[derive(Accounts)]
pub struct EmitVestingQuote<'info> {
    #[account(seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [BENEFICIARIES_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,
}

#[event]
pub struct VestingQuote {
    pub wallet: Pubkey,
    pub now: i64,
    pub eliminated_at: i64,
    pub vested_time: i64,
    pub vested_time_batch2: i64,
    pub linear_vested_time: i64,
    pub linear_vested_time_batch2: i64,
    pub linear_unlocks_passed: u32,
    pub linear_unlocks_passed_batch2: u32,
    pub vesting_schedule: u64,
    pub vesting_schedule_batch2: u64,
    pub unlocked: u64,
    pub unlocked_batch1: u64,
    pub unlocked_batch2: u64,
    pub locked: u64,
    pub min_claimable: u64,
    pub max_claimable: u64,
    pub total_claimed: u64,
    pub total_fee: u64,
    pub total_burned: u64,
    pub next_unlock_at: i64,
}
