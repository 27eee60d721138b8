use anchor_lang::prelude::*;

use crate::constants::MAX_BENEFICIARIES;
use crate::error::VestingError;
use crate::state::LedgerTotals;
use crate::utils::claim::ClaimPlan;
use crate::utils::math::add;
use crate::utils::schedule::VestingClock;

/// Per-beneficiary ledger entry. Created once by `whitelist`, never removed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Beneficiary {
    pub wallet: Pubkey,
    pub has_batch2_delay: bool,
    /// 0 while active, otherwise the elimination timestamp.
    pub eliminated_at: i64,
    pub total_allocation: u64,
    /// Fee baked into the allocation at registration (part of `total_fee`).
    pub initial_fee: u64,
    pub total_fee: u64,
    /// Unvested remainder converted to fee at elimination (part of `total_fee`).
    pub forfeited: u64,
    pub total_burned: u64,
    pub total_claimed: u64,
    pub claimed_batch1: u64,
    pub claimed_batch2: u64,
    pub claimed_from_locked: u64,
    /// Fee already released to the operator.
    pub fee_collected: u64,
}

impl Beneficiary {
    pub const SIZE: usize =
        32 + // wallet
        1 +  // has_batch2_delay
        8 +  // eliminated_at
        8 +  // total_allocation
        8 +  // initial_fee
        8 +  // total_fee
        8 +  // forfeited
        8 +  // total_burned
        8 +  // total_claimed
        8 +  // claimed_batch1
        8 +  // claimed_batch2
        8 +  // claimed_from_locked
        8;   // fee_collected

    pub fn new(wallet: Pubkey, allocation: u64, has_batch2_delay: bool, initial_fee: u64) -> Self {
        Self {
            wallet,
            has_batch2_delay,
            total_allocation: allocation,
            initial_fee,
            total_fee: initial_fee,
            ..Self::default()
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated_at != 0
    }

    pub fn clock(&self) -> VestingClock {
        if self.is_eliminated() {
            VestingClock::FrozenAt(self.eliminated_at)
        } else {
            VestingClock::Live
        }
    }

    /// claimed + fee + burned.
    pub fn consumed(&self) -> std::result::Result<u64, VestingError> {
        add(add(self.total_claimed, self.total_fee)?, self.total_burned)
    }

    fn ensure_conserved(&self) -> std::result::Result<(), VestingError> {
        if self.consumed()? > self.total_allocation {
            return Err(VestingError::AllocationExceeded);
        }
        Ok(())
    }

    /// Books a planned claim on the entry and the global totals together.
    pub fn apply_claim(
        &mut self,
        totals: &mut LedgerTotals,
        plan: &ClaimPlan,
    ) -> std::result::Result<(), VestingError> {
        let mut next = *self;
        next.claimed_batch1 = add(next.claimed_batch1, plan.from_batch1)?;
        next.claimed_batch2 = add(next.claimed_batch2, plan.from_batch2)?;
        next.claimed_from_locked = add(next.claimed_from_locked, plan.from_locked)?;
        next.total_claimed = add(next.total_claimed, plan.amount)?;
        next.total_fee = add(next.total_fee, plan.fee)?;
        next.total_burned = add(next.total_burned, plan.burned)?;
        next.ensure_conserved()?;

        let mut next_totals = *totals;
        next_totals.total_claimed = add(next_totals.total_claimed, plan.amount)?;
        next_totals.total_fee = add(next_totals.total_fee, plan.fee)?;
        next_totals.total_burned = add(next_totals.total_burned, plan.burned)?;

        *self = next;
        *totals = next_totals;
        Ok(())
    }

    /// Freezes the clock at `now` and converts `forfeited` into fee.
    pub fn apply_elimination(
        &mut self,
        totals: &mut LedgerTotals,
        now: i64,
        forfeited: u64,
    ) -> std::result::Result<(), VestingError> {
        if self.is_eliminated() {
            return Err(VestingError::AlreadyEliminated);
        }
        let mut next = *self;
        next.eliminated_at = now;
        next.forfeited = forfeited;
        next.total_fee = add(next.total_fee, forfeited)?;
        next.ensure_conserved()?;

        let total_fee = add(totals.total_fee, forfeited)?;

        *self = next;
        totals.total_fee = total_fee;
        Ok(())
    }

    pub fn apply_fee_collection(
        &mut self,
        totals: &mut LedgerTotals,
        amount: u64,
    ) -> std::result::Result<(), VestingError> {
        let fee_collected = add(self.fee_collected, amount)?;
        if fee_collected > self.total_fee {
            return Err(VestingError::MathOverflow);
        }
        let total_fee_collected = add(totals.total_fee_collected, amount)?;

        self.fee_collected = fee_collected;
        totals.total_fee_collected = total_fee_collected;
        Ok(())
    }
}

/// PDA holding every registered beneficiary (<= 64 entries).
#[account]
pub struct Beneficiaries {
    pub entries: Vec<Beneficiary>,
}

impl Beneficiaries {
    /// Space for discriminator + vec header + full capacity.
    pub const fn space() -> usize {
        8 + 4 + MAX_BENEFICIARIES * Beneficiary::SIZE
    }

    pub fn find(&self, wallet: &Pubkey) -> Option<&Beneficiary> {
        self.entries.iter().find(|e| e.wallet == *wallet)
    }

    pub fn find_mut(&mut self, wallet: &Pubkey) -> Option<&mut Beneficiary> {
        self.entries.iter_mut().find(|e| e.wallet == *wallet)
    }

    /// Entry for `wallet`, or a zeroed one when it was never registered.
    pub fn snapshot(&self, wallet: &Pubkey) -> Beneficiary {
        self.find(wallet).copied().unwrap_or(Beneficiary {
            wallet: *wallet,
            ..Beneficiary::default()
        })
    }

    /// Appends a new entry and accounts for it in `totals`.
    pub fn register(
        &mut self,
        totals: &mut LedgerTotals,
        entry: Beneficiary,
    ) -> std::result::Result<(), VestingError> {
        if self.find(&entry.wallet).is_some() {
            return Err(VestingError::AlreadyWhitelisted);
        }
        if self.entries.len() >= MAX_BENEFICIARIES {
            return Err(VestingError::BeneficiaryListFull);
        }
        entry.ensure_conserved()?;

        let total_allocated = add(totals.total_allocated, entry.total_allocation)?;
        let total_fee = add(totals.total_fee, entry.total_fee)?;

        self.entries.push(entry);
        totals.total_allocated = total_allocated;
        totals.total_fee = total_fee;
        Ok(())
    }

    /// Recomputes the aggregates from the entries.
    pub fn sum_totals(&self) -> std::result::Result<LedgerTotals, VestingError> {
        self.entries
            .iter()
            .try_fold(LedgerTotals::default(), |acc, e| -> std::result::Result<_, VestingError> {
                Ok(LedgerTotals {
                    total_allocated: add(acc.total_allocated, e.total_allocation)?,
                    total_fee: add(acc.total_fee, e.total_fee)?,
                    total_claimed: add(acc.total_claimed, e.total_claimed)?,
                    total_burned: add(acc.total_burned, e.total_burned)?,
                    total_fee_collected: add(acc.total_fee_collected, e.fee_collected)?,
                })
            })
    }

    /// True when the running aggregates match the per-entry sums.
    pub fn reconcile(&self, totals: &LedgerTotals) -> bool {
        matches!(self.sum_totals(), Ok(sum) if sum == *totals)
    }
}
