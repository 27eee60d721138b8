use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{BENEFICIARIES_SEED, MAX_BATCH, STATE_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, VestingState};
use crate::utils::math::add;
use crate::utils::schedule::collectible_fee;

/// Releases the vested, not yet collected fee of each wallet to the active
/// collector's tally. Returns the total to pay out.
pub fn process_collect_fees(
    state: &mut VestingState,
    list: &mut Beneficiaries,
    caller: &Pubkey,
    wallets: &[Pubkey],
    now: i64,
) -> std::result::Result<u64, VestingError> {
    state.require_privileged(caller)?;
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
    let mut collected = 0u64;
    for wallet in wallets {
        let entry = staged
            .find_mut(wallet)
            .ok_or(VestingError::BeneficiaryNotFound)?;
        let amount = collectible_fee(&state.config, entry, now)?;
        if amount > 0 {
            entry.apply_fee_collection(&mut totals, amount)?;
            collected = add(collected, amount)?;
        }
    }
    if collected == 0 {
        return Err(VestingError::NothingToCollect);
    }

    let mut collectors = state.fee_collectors;
    collectors.active_mut().record(collected)?;

    list.entries = staged.entries;
    state.totals = totals;
    state.fee_collectors = collectors;
    Ok(collected)
}

pub fn collect_fees(ctx: Context<CollectFees>, wallets: Vec<Pubkey>) -> Result<()> {
    // Avoid borrow checker conflicts: capture AccountInfos before taking mutable borrows.
    let vesting_state_ai = ctx.accounts.vesting_state.to_account_info();

    let st = &mut ctx.accounts.vesting_state;
    require_keys_eq!(
        ctx.accounts.collector_token_account.owner,
        st.fee_collectors.active().wallet,
        VestingError::InvalidTokenAccount
    );
    require_keys_eq!(
        ctx.accounts.collector_token_account.mint,
        st.mint,
        VestingError::InvalidTokenMint
    );

    let now = Clock::get()?.unix_timestamp;
    let amount = process_collect_fees(
        st,
        &mut ctx.accounts.beneficiaries,
        &ctx.accounts.authority.key(),
        &wallets,
        now,
    )?;
    require!(
        ctx.accounts.vault.amount >= amount,
        VestingError::InsufficientVaultBalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[STATE_SEED, &[st.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.collector_token_account.to_account_info(),
                authority: vesting_state_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    let active = st.fee_collectors.active();
    emit!(FeesCollected {
        collector: active.wallet,
        amount,
        collector_total: active.total_collected,
        total_fee_collected: st.totals.total_fee_collected,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CollectFees<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
        seeds = [BENEFICIARIES_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Token account of the active fee collector.
    #[account(mut)]
    pub collector_token_account: Account<'info, TokenAccount>,

    /// Owner or manager.
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct FeesCollected {
    pub collector: Pubkey,
    pub amount: u64,
    pub collector_total: u64,
    pub total_fee_collected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::claim::process_claim;
    use crate::instructions::eliminate::process_eliminate;
    use crate::test_utils::*;

    #[test]
    fn forfeited_fee_vests_before_collection() {
        let mut f = Fixture::new(daily_config(800));
        let w = f.add(5_000, false, 0);
        let manager = f.manager;
        let t = at_days(230);
        process_claim(&mut f.state, &mut f.list, &w, 0, at_days(160)).unwrap();
        process_eliminate(&mut f.state, &mut f.list, &manager, &[w], t).unwrap();

        // Nothing forfeited has vested at the elimination instant.
        let res = process_collect_fees(&mut f.state, &mut f.list, &manager, &[w], t);
        assert!(matches!(res, Err(VestingError::NothingToCollect)));

        // 4420 vested: 600 past the forfeited top of 1180.
        let got = process_collect_fees(&mut f.state, &mut f.list, &manager, &[w], at_days(260)).unwrap();
        assert_eq!(got, 600 * UNIT);
        let res = process_collect_fees(&mut f.state, &mut f.list, &manager, &[w], at_days(260));
        assert!(matches!(res, Err(VestingError::NothingToCollect)));

        let got = process_collect_fees(&mut f.state, &mut f.list, &manager, &[w], at_days(300)).unwrap();
        assert_eq!(got, 580 * UNIT);
        assert_eq!(f.entry(&w).fee_collected, 1_180 * UNIT);
        assert_eq!(f.state.totals.total_fee_collected, 1_180 * UNIT);
        assert_eq!(f.state.fee_collectors.active().total_collected, 1_180 * UNIT);
        f.assert_reconciled();
    }

    #[test]
    fn immediate_initial_fee() {
        let mut cfg = daily_config(800);
        cfg.initial_fee_vests = false;
        let mut f = Fixture::new(cfg);
        let owner = f.owner;
        let a = f.add(1_000, false, 100 * UNIT);
        let b = f.add(1_000, false, 0);

        let res = process_collect_fees(&mut f.state, &mut f.list, &owner, &[b], START - 1);
        assert!(matches!(res, Err(VestingError::NothingToCollect)));
        let got = process_collect_fees(&mut f.state, &mut f.list, &owner, &[a, b], START - 1).unwrap();
        assert_eq!(got, 100 * UNIT);
        f.assert_reconciled();
    }

    #[test]
    fn collected_tally_follows_collector_switch() {
        let mut f = Fixture::new(daily_config(800));
        let owner = f.owner;
        let w = f.add(1_000, false, 100 * UNIT);

        // 20% first unlock
        process_collect_fees(&mut f.state, &mut f.list, &owner, &[w], START).unwrap();
        assert_eq!(f.state.fee_collectors.slots[0].total_collected, 20 * UNIT);

        f.state.fee_collectors.switch().unwrap();
        let got = process_collect_fees(&mut f.state, &mut f.list, &owner, &[w], at_days(400)).unwrap();
        assert_eq!(got, 80 * UNIT);
        assert_eq!(f.state.fee_collectors.active().wallet, f.collectors[1]);
        assert_eq!(f.state.fee_collectors.active().total_collected, 100 * UNIT);
        assert_eq!(f.state.fee_collectors.slots[0].total_collected, 0);
    }

    #[test]
    fn unknown_wallet_aborts_batch() {
        let mut f = Fixture::new(daily_config(800));
        let owner = f.owner;
        let w = f.add(1_000, false, 100 * UNIT);
        let res = process_collect_fees(&mut f.state, &mut f.list, &owner, &[w, Pubkey::new_unique()], START);
        assert!(matches!(res, Err(VestingError::BeneficiaryNotFound)));
        assert_eq!(f.entry(&w).fee_collected, 0);
        assert_eq!(f.state.totals.total_fee_collected, 0);

        let stranger = Pubkey::new_unique();
        let res = process_collect_fees(&mut f.state, &mut f.list, &stranger, &[w], START);
        assert!(matches!(res, Err(VestingError::UnauthorizedManager)));
    }
}
