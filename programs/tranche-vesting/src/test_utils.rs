//! Shared fixtures for unit tests: the canonical daily schedule (200 daily
//! ticks after a 90 day cliff, 20% first unlock, 30% batch1, 90 day batch2
//! delay) and small builders around it.

use anchor_lang::prelude::*;

use crate::state::{Beneficiaries, Beneficiary, FeeCollectors, LedgerTotals, ScheduleConfig, VestingState};

/// One whole token at 6 decimals.
pub const UNIT: u64 = 1_000_000;
pub const DAY: i64 = 86_400;
pub const START: i64 = 1_700_000_000;

/// A few seconds past `START + days`, so boundaries are clearly crossed.
pub fn at_days(days: i64) -> i64 {
    START + days * DAY + 5
}

pub fn daily_config(burn_rate: u16) -> ScheduleConfig {
    ScheduleConfig {
        start_time: START,
        first_unlock_permille: 200,
        linear_vesting_offset: 90 * DAY,
        linear_vesting_period: DAY,
        linear_unlocks_count: 200,
        batch1_permille: 300,
        batch2_delay: 90 * DAY,
        locked_claimable_offset: 90 * DAY,
        burn_rate,
        fee_share_permille: 1_000,
        initial_fee_vests: true,
    }
}

/// Nine monthly ticks after a one month cliff, 10% first unlock, locked pool
/// open from the start.
pub fn monthly_config(burn_rate: u16) -> ScheduleConfig {
    ScheduleConfig {
        first_unlock_permille: 100,
        linear_vesting_offset: 30 * DAY,
        linear_vesting_period: 30 * DAY,
        linear_unlocks_count: 9,
        locked_claimable_offset: 0,
        ..daily_config(burn_rate)
    }
}

pub fn beneficiary(tokens: u64, has_batch2_delay: bool) -> Beneficiary {
    Beneficiary::new(Pubkey::new_unique(), tokens * UNIT, has_batch2_delay, 0)
}

pub struct Fixture {
    pub owner: Pubkey,
    pub manager: Pubkey,
    pub collectors: [Pubkey; 2],
    pub state: VestingState,
    pub list: Beneficiaries,
}

impl Fixture {
    pub fn new(config: ScheduleConfig) -> Self {
        let owner = Pubkey::new_unique();
        let manager = Pubkey::new_unique();
        let collectors = [Pubkey::new_unique(), Pubkey::new_unique()];
        let state = VestingState {
            owner,
            manager,
            mint: Pubkey::new_unique(),
            bump: 255,
            config,
            totals: LedgerTotals::default(),
            whitelisting_open: true,
            fee_collectors: FeeCollectors::new(collectors[0], collectors[1]),
        };
        Self {
            owner,
            manager,
            collectors,
            state,
            list: Beneficiaries { entries: Vec::new() },
        }
    }

    /// Registers `tokens` whole tokens for a fresh wallet and returns it.
    pub fn add(&mut self, tokens: u64, has_batch2_delay: bool, initial_fee: u64) -> Pubkey {
        let wallet = Pubkey::new_unique();
        self.list
            .register(
                &mut self.state.totals,
                Beneficiary::new(wallet, tokens * UNIT, has_batch2_delay, initial_fee),
            )
            .unwrap();
        wallet
    }

    pub fn entry(&self, wallet: &Pubkey) -> Beneficiary {
        *self.list.find(wallet).unwrap()
    }

    pub fn assert_reconciled(&self) {
        assert!(self.list.reconcile(&self.state.totals));
        for e in &self.list.entries {
            assert!(e.consumed().unwrap() <= e.total_allocation);
        }
        assert!(self.state.totals.total_fee_collected <= self.state.totals.total_fee);
    }
}
