use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARIES_SEED, MAX_WHITELIST_BATCH, STATE_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, Beneficiary, VestingState};

/// Registers a batch of beneficiaries. All-or-nothing: one bad entry leaves
/// both the list and the totals untouched.
pub fn process_whitelist(
    state: &mut VestingState,
    list: &mut Beneficiaries,
    caller: &Pubkey,
    wallets: &[Pubkey],
    allocations: &[u64],
    batch2_delay_flags: &[bool],
    initial_fees: &[u64],
    is_final: bool,
) -> std::result::Result<(), VestingError> {
    state.require_owner(caller)?;
    if !state.whitelisting_open {
        return Err(VestingError::WhitelistingClosed);
    }
    let len = wallets.len();
    if allocations.len() != len || batch2_delay_flags.len() != len || initial_fees.len() != len {
        return Err(VestingError::BatchLengthMismatch);
    }
    if len > MAX_WHITELIST_BATCH {
        return Err(VestingError::BatchTooLarge);
    }

    let mut staged = Beneficiaries {
        entries: list.entries.clone(),
    };
    let mut totals = state.totals;
    for i in 0..len {
        if wallets[i] == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        if allocations[i] == 0 || initial_fees[i] > allocations[i] {
            return Err(VestingError::InvalidAllocation);
        }
        staged.register(
            &mut totals,
            Beneficiary::new(wallets[i], allocations[i], batch2_delay_flags[i], initial_fees[i]),
        )?;
    }

    list.entries = staged.entries;
    state.totals = totals;
    if is_final {
        state.whitelisting_open = false;
    }
    Ok(())
}

pub fn whitelist(
    ctx: Context<Whitelist>,
    wallets: Vec<Pubkey>,
    allocations: Vec<u64>,
    batch2_delay_flags: Vec<bool>,
    initial_fees: Vec<u64>,
    is_final: bool,
) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    process_whitelist(
        st,
        &mut ctx.accounts.beneficiaries,
        &ctx.accounts.owner.key(),
        &wallets,
        &allocations,
        &batch2_delay_flags,
        &initial_fees,
        is_final,
    )?;

    emit!(BeneficiariesWhitelisted {
        count: wallets.len() as u8,
        allocated: allocations.iter().sum(),
        initial_fee: initial_fees.iter().sum(),
        total_allocated: st.totals.total_allocated,
        whitelisting_open: st.whitelisting_open,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Whitelist<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [BENEFICIARIES_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    pub owner: Signer<'info>,
}

#[event]
pub struct BeneficiariesWhitelisted {
    pub count: u8,
    pub allocated: u64,
    pub initial_fee: u64,
    pub total_allocated: u64,
    pub whitelisting_open: bool,
}
