use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

/// Activates the other collector and hands the collected tally over to it.
pub fn process_switch_fee_collectors(
    state: &mut VestingState,
    caller: &Pubkey,
) -> std::result::Result<u64, VestingError> {
    state.require_owner(caller)?;
    state.fee_collectors.switch()
}

pub fn switch_fee_collectors(ctx: Context<SwitchFeeCollectors>) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    let previous = st.fee_collectors.active().wallet;
    let carried = process_switch_fee_collectors(st, &ctx.accounts.owner.key())?;

    emit!(FeeCollectorsSwitched {
        previous,
        active: st.fee_collectors.active().wallet,
        carried,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SwitchFeeCollectors<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub owner: Signer<'info>,
}

#[event]
pub struct FeeCollectorsSwitched {
    pub previous: Pubkey,
    pub active: Pubkey,
    pub carried: u64,
}
