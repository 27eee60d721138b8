use anchor_lang::prelude::*;

use crate::constants::PERMILLE;
use crate::error::VestingError;

/// Schedule parameters. Fixed at `initialize` except `burn_rate` and
/// `locked_claimable_offset`, which the owner may update.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Vesting start (Unix seconds).
    pub start_time: i64,
    /// Share of the allocation released at `start_time`.
    pub first_unlock_permille: u16,
    /// Seconds after start before linear ticks begin.
    pub linear_vesting_offset: i64,
    /// Seconds per linear tick (> 0).
    pub linear_vesting_period: i64,
    pub linear_unlocks_count: u32,
    /// Share of the schedule released on the undelayed clock.
    pub batch1_permille: u16,
    /// Extra delay applied to the batch2 clock.
    pub batch2_delay: i64,
    /// Seconds after start before unvested tokens become early-claimable.
    pub locked_claimable_offset: i64,
    /// Penalty rate on early release of locked tokens, in (0, 1000].
    pub burn_rate: u16,
    /// Share of every penalty booked as collectible fee; the rest is burned.
    pub fee_share_permille: u16,
    /// When false, a registration-time fee is collectible immediately instead
    /// of vesting with the allocation.
    pub initial_fee_vests: bool,
}

impl ScheduleConfig {
    pub const SIZE: usize =
        8 + // start_time
        2 + // first_unlock_permille
        8 + // linear_vesting_offset
        8 + // linear_vesting_period
        4 + // linear_unlocks_count
        2 + // batch1_permille
        8 + // batch2_delay
        8 + // locked_claimable_offset
        2 + // burn_rate
        2 + // fee_share_permille
        1;  // initial_fee_vests

    pub fn validate(&self) -> std::result::Result<(), VestingError> {
        if self.start_time <= 0 {
            return Err(VestingError::InvalidConfig);
        }
        if self.linear_vesting_period <= 0
            || self.linear_vesting_offset < 0
            || self.batch2_delay < 0
            || self.locked_claimable_offset < 0
        {
            return Err(VestingError::InvalidConfig);
        }
        for permille in [
            self.first_unlock_permille,
            self.batch1_permille,
            self.fee_share_permille,
        ] {
            if u64::from(permille) > PERMILLE {
                return Err(VestingError::InvalidConfig);
            }
        }
        // Without ticks the whole allocation must unlock at start.
        if self.linear_unlocks_count == 0 && u64::from(self.first_unlock_permille) != PERMILLE {
            return Err(VestingError::InvalidConfig);
        }
        validate_burn_rate(self.burn_rate)
    }
}

pub fn validate_burn_rate(rate: u16) -> std::result::Result<(), VestingError> {
    if rate == 0 || u64::from(rate) > PERMILLE {
        return Err(VestingError::InvalidBurnRate);
    }
    Ok(())
}

/// O(1) running aggregates over all beneficiary entries. Only mutated
/// together with the entry that caused the change.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub total_allocated: u64,
    pub total_fee: u64,
    pub total_claimed: u64,
    pub total_burned: u64,
    pub total_fee_collected: u64,
}

impl LedgerTotals {
    pub const SIZE: usize = 8 * 5;
}

/// One of the two operator identities that receive collected fees.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeCollector {
    pub wallet: Pubkey,
    /// Running tally of fees collected while (or since) this slot was active.
    pub total_collected: u64,
}

impl FeeCollector {
    pub const SIZE: usize = 32 + 8;

    pub fn record(&mut self, amount: u64) -> std::result::Result<(), VestingError> {
        self.total_collected = self
            .total_collected
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    /// Moves this collector's running tally onto `to` and zeroes it here.
    pub fn hand_off(&mut self, to: &mut FeeCollector) -> std::result::Result<u64, VestingError> {
        let carried = self.total_collected;
        to.record(carried)?;
        self.total_collected = 0;
        Ok(carried)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeCollectors {
    pub slots: [FeeCollector; 2],
    /// Index of the active slot (0 or 1).
    pub active: u8,
}

impl FeeCollectors {
    pub const SIZE: usize = FeeCollector::SIZE * 2 + 1;

    pub fn new(first: Pubkey, second: Pubkey) -> Self {
        Self {
            slots: [
                FeeCollector { wallet: first, total_collected: 0 },
                FeeCollector { wallet: second, total_collected: 0 },
            ],
            active: 0,
        }
    }

    fn active_index(&self) -> usize {
        usize::from(self.active != 0)
    }

    pub fn active(&self) -> &FeeCollector {
        &self.slots[self.active_index()]
    }

    pub fn active_mut(&mut self) -> &mut FeeCollector {
        let idx = self.active_index();
        &mut self.slots[idx]
    }

    /// Activates the other slot, handing the vacated tally over to it.
    /// Returns the amount carried across.
    pub fn switch(&mut self) -> std::result::Result<u64, VestingError> {
        let vacated = self.active_index();
        let [first, second] = &mut self.slots;
        let carried = if vacated == 0 {
            first.hand_off(second)?
        } else {
            second.hand_off(first)?
        };
        self.active = (1 - vacated) as u8;
        Ok(carried)
    }
}

/// Single vesting state PDA.
#[account]
pub struct VestingState {
    pub owner: Pubkey,
    /// Delegated privileged role (eliminate, collect fees).
    pub manager: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
    pub config: ScheduleConfig,
    pub totals: LedgerTotals,
    /// Latched to false once the final registration batch is submitted.
    pub whitelisting_open: bool,
    pub fee_collectors: FeeCollectors,
}

impl VestingState {
    pub const SIZE: usize =
        32 + // owner
        32 + // manager
        32 + // mint
        1 +  // bump
        ScheduleConfig::SIZE +
        LedgerTotals::SIZE +
        1 +  // whitelisting_open
        FeeCollectors::SIZE;

    pub fn require_owner(&self, caller: &Pubkey) -> std::result::Result<(), VestingError> {
        if *caller != self.owner {
            return Err(VestingError::UnauthorizedOwner);
        }
        Ok(())
    }

    /// Owner or delegated manager.
    pub fn require_privileged(&self, caller: &Pubkey) -> std::result::Result<(), VestingError> {
        if *caller != self.owner && *caller != self.manager {
            return Err(VestingError::UnauthorizedManager);
        }
        Ok(())
    }
}
