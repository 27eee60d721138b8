use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::error::VestingError;
use crate::state::{validate_burn_rate, VestingState};

/// Returns the previous rate.
pub fn process_set_burn_rate(
    state: &mut VestingState,
    caller: &Pubkey,
    burn_rate: u16,
) -> std::result::Result<u16, VestingError> {
    state.require_owner(caller)?;
    validate_burn_rate(burn_rate)?;
    let old = state.config.burn_rate;
    state.config.burn_rate = burn_rate;
    Ok(old)
}

pub fn set_burn_rate(ctx: Context<SetBurnRate>, burn_rate: u16) -> Result<()> {
    let old = process_set_burn_rate(
        &mut ctx.accounts.vesting_state,
        &ctx.accounts.owner.key(),
        burn_rate,
    )?;
    emit!(BurnRateSet { old, new: burn_rate });
    Ok(())
}

#[derive(Accounts)]
pub struct SetBurnRate<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    pub owner: Signer<'info>,
}

#[event]
pub struct BurnRateSet {
    pub old: u16,
    pub new: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::utils::schedule::locked;

    #[test]
    fn new_rate_applies_to_locked_pool() {
        let mut f = Fixture::new(daily_config(800));
        let w = f.add(5_000, false, 0);
        let owner = f.owner;
        let t = at_days(160);
        assert_eq!(locked(&f.state.config, &f.entry(&w), t).unwrap(), 516 * UNIT);

        assert_eq!(process_set_burn_rate(&mut f.state, &owner, 500).unwrap(), 800);
        assert_eq!(locked(&f.state.config, &f.entry(&w), t).unwrap(), 1_290 * UNIT);

        process_set_burn_rate(&mut f.state, &owner, 1_000).unwrap();
        assert_eq!(locked(&f.state.config, &f.entry(&w), t).unwrap(), 0);
    }

    #[test]
    fn rejects_bad_rate_and_non_owner() {
        let mut f = Fixture::new(daily_config(800));
        let owner = f.owner;
        let manager = f.manager;
        let res = process_set_burn_rate(&mut f.state, &owner, 0);
        assert!(matches!(res, Err(VestingError::InvalidBurnRate)));
        let res = process_set_burn_rate(&mut f.state, &owner, 1_001);
        assert!(matches!(res, Err(VestingError::InvalidBurnRate)));
        let res = process_set_burn_rate(&mut f.state, &manager, 500);
        assert!(matches!(res, Err(VestingError::UnauthorizedOwner)));
        assert_eq!(f.state.config.burn_rate, 800);
    }
}
