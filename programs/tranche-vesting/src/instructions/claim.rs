use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::constants::{BENEFICIARIES_SEED, STATE_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, VestingState};
use crate::utils::claim::{plan_claim, ClaimPlan};
use crate::utils::math::add;

/// Books a claim for `wallet` on the ledger. The caller moves the tokens.
pub fn process_claim(
    state: &mut VestingState,
    list: &mut Beneficiaries,
    wallet: &Pubkey,
    extra_amount: u64,
    now: i64,
) -> std::result::Result<ClaimPlan, VestingError> {
    // Unknown wallets plan against a zeroed entry and end up with nothing.
    let snapshot = list.snapshot(wallet);
    let plan = plan_claim(&state.config, &snapshot, extra_amount, now)?;
    let entry = list.find_mut(wallet).ok_or(VestingError::NothingToClaim)?;
    entry.apply_claim(&mut state.totals, &plan)?;
    Ok(plan)
}

pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let wallet = ctx.accounts.caller.key();
    execute_claim(ctx, wallet, 0)
}

/// Relayed claim: anyone may trigger it, tokens only reach `beneficiary`.
pub fn claim_for(ctx: Context<Claim>, beneficiary: Pubkey) -> Result<()> {
    execute_claim(ctx, beneficiary, 0)
}

pub fn claim_with_extra(ctx: Context<Claim>, extra_amount: u64) -> Result<()> {
    let wallet = ctx.accounts.caller.key();
    execute_claim(ctx, wallet, extra_amount)
}

fn execute_claim(ctx: Context<Claim>, wallet: Pubkey, extra_amount: u64) -> Result<()> {
    // Avoid borrow checker conflicts: capture AccountInfos before taking mutable borrows.
    let vesting_state_ai = ctx.accounts.vesting_state.to_account_info();

    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.owner,
        wallet,
        VestingError::InvalidTokenAccount
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.mint,
        ctx.accounts.vesting_state.mint,
        VestingError::InvalidTokenMint
    );

    let now = Clock::get()?.unix_timestamp;
    let st = &mut ctx.accounts.vesting_state;
    let plan = process_claim(st, &mut ctx.accounts.beneficiaries, &wallet, extra_amount, now)?;

    require!(
        ctx.accounts.vault.amount >= add(plan.amount, plan.burned)?,
        VestingError::InsufficientVaultBalance
    );

    let bump = st.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[STATE_SEED, &[bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: vesting_state_ai.clone(),
            },
            signer_seeds,
        ),
        plan.amount,
    )?;

    if plan.burned > 0 {
        token::burn(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Burn {
                    mint: ctx.accounts.mint.to_account_info(),
                    from: ctx.accounts.vault.to_account_info(),
                    authority: vesting_state_ai,
                },
                signer_seeds,
            ),
            plan.burned,
        )?;
    }

    emit!(TokensClaimed {
        wallet,
        caller: ctx.accounts.caller.key(),
        amount: plan.amount,
        from_batch1: plan.from_batch1,
        from_batch2: plan.from_batch2,
        from_locked: plan.from_locked,
        fee: plan.fee,
        burned: plan.burned,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
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

    #[account(mut, address = vesting_state.mint @ VestingError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub wallet: Pubkey,
    pub caller: Pubkey,
    pub amount: u64,
    pub from_batch1: u64,
    pub from_batch2: u64,
    pub from_locked: u64,
    pub fee: u64,
    pub burned: u64,
}
