use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

pub fn process_set_locked_claimable_offset(
    state: &mut VestingState,
    caller: &Pubkey,
    offset: i64,
) -> std::result::Result<i64, VestingError> {
    state.require_owner(caller)?;
    if offset < 0 {
        return Err(VestingError::InvalidConfig);
    }
    let old = state.config.locked_claimable_offset;
    state.config.locked_claimable_offset = offset;
    Ok(old)
}

pub fn set_locked_claimable_offset(
    ctx: Context<SetLockedClaimableOffset>,
    offset: i64,
) -> Result<()> {
    let old = process_set_locked_claimable_offset(
        &mut ctx.accounts.vesting_state,
        &ctx.accounts.owner.key(),
        offset,
    )?;
    emit!(LockedClaimableOffsetSet { old, new: offset });
    Ok(())
}

#[derive(Accounts)]
pub struct SetLockedClaimableOffset<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub owner: Signer<'info>,
}

#[event]
pub struct LockedClaimableOffsetSet {
    pub old: i64,
    pub new: i64,
}
