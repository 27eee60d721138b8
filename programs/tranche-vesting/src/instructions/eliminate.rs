use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARIES_SEED, MAX_BATCH, STATE_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, VestingState};
use crate::utils::schedule::position;

/// Freezes each wallet's clock at `now` and converts its unvested remainder
/// into fee. Returns `(wallet, forfeited)` per wallet. Nothing is committed
/// unless every wallet can be eliminated.
pub fn process_eliminate(
    state: &mut VestingState,
    list: &mut Beneficiaries,
    caller: &Pubkey,
    wallets: &[Pubkey],
    now: i64,
) -> std::result::Result<Vec<(Pubkey, u64)>, VestingError> {
    state.require_privileged(caller)?;
    if now < state.config.start_time {
        return Err(VestingError::EliminatingBeforeStart);
    }
    if wallets.is_empty() {
        return Err(VestingError::EmptyBatch);
    }
    if wallets.len() > MAX_BATCH {
        return Err(VestingError::BatchTooLarge);
    }

    let mut staged = Beneficiaries {
        entries: list.entries.clone(),
    };
    let mut totals = state.totals;
    let mut forfeits = Vec::with_capacity(wallets.len());
    for wallet in wallets {
        let entry = staged
            .find_mut(wallet)
            .ok_or(VestingError::BeneficiaryNotFound)?;
        if entry.is_eliminated() {
            return Err(VestingError::AlreadyEliminated);
        }
        let forfeited = position(&state.config, entry, now)?.unvested;
        entry.apply_elimination(&mut totals, now, forfeited)?;
        forfeits.push((*wallet, forfeited));
    }

    list.entries = staged.entries;
    state.totals = totals;
    Ok(forfeits)
}

pub fn eliminate(ctx: Context<Eliminate>, wallets: Vec<Pubkey>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let forfeits = process_eliminate(
        &mut ctx.accounts.vesting_state,
        &mut ctx.accounts.beneficiaries,
        &ctx.accounts.authority.key(),
        &wallets,
        now,
    )?;

    for (wallet, forfeited) in forfeits {
        emit!(BeneficiaryEliminated {
            wallet,
            eliminated_at: now,
            forfeited,
        });
    }
    Ok(())
}

#[derive(Accounts)]
pub struct Eliminate<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [BENEFICIARIES_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    /// Owner or manager.
    pub authority: Signer<'info>,
}

#[event]
pub struct BeneficiaryEliminated {
    pub wallet: Pubkey,
    pub eliminated_at: i64,
    pub forfeited: u64,
}
