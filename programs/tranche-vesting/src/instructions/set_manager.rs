use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

/// Returns the previous manager.
pub fn process_set_manager(
    state: &mut VestingState,
    caller: &Pubkey,
    new_manager: Pubkey,
) -> std::result::Result<Pubkey, VestingError> {
    state.require_owner(caller)?;
    if new_manager == Pubkey::default() {
        return Err(VestingError::InvalidPubkey);
    }
    let old = state.manager;
    state.manager = new_manager;
    Ok(old)
}

pub fn set_manager(ctx: Context<SetManager>, new_manager: Pubkey) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    let old = process_set_manager(st, &ctx.accounts.owner.key(), new_manager)?;

    emit!(ManagerSet {
        owner: st.owner,
        old_manager: old,
        new_manager,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetManager<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub owner: Signer<'info>,
}

#[event]
pub struct ManagerSet {
    pub owner: Pubkey,
    pub old_manager: Pubkey,
    pub new_manager: Pubkey,
}
