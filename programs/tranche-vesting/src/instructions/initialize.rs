use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{BENEFICIARIES_SEED, MAX_BENEFICIARIES, STATE_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::{Beneficiaries, FeeCollectors, LedgerTotals, ScheduleConfig, VestingState};

pub fn initialize(
    ctx: Context<Initialize>,
    manager: Pubkey,
    fee_collectors: [Pubkey; 2],
    config: ScheduleConfig,
) -> Result<()> {
    config.validate()?;
    require!(manager != Pubkey::default(), VestingError::InvalidPubkey);
    for collector in fee_collectors {
        require!(collector != Pubkey::default(), VestingError::InvalidPubkey);
    }
    require!(
        fee_collectors[0] != fee_collectors[1],
        VestingError::InvalidConfig
    );

    let st = &mut ctx.accounts.vesting_state;
    st.owner = ctx.accounts.owner.key();
    st.manager = manager;
    st.mint = ctx.accounts.mint.key();
    st.bump = ctx.bumps.vesting_state;
    st.config = config;
    st.totals = LedgerTotals::default();
    st.whitelisting_open = true;
    st.fee_collectors = FeeCollectors::new(fee_collectors[0], fee_collectors[1]);

    ctx.accounts.beneficiaries.entries = Vec::with_capacity(MAX_BENEFICIARIES);

    emit!(VestingInitialized {
        owner: st.owner,
        manager,
        mint: st.mint,
        start_time: config.start_time,
        fee_collectors,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + VestingState::SIZE,
        seeds = [STATE_SEED],
        bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        init,
        payer = owner,
        space = Beneficiaries::space(),
        seeds = [BENEFICIARIES_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    #[account(
        init,
        payer = owner,
        token::mint = mint,
        token::authority = vesting_state,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub owner: Pubkey,
    pub manager: Pubkey,
    pub mint: Pubkey,
    pub start_time: i64,
    pub fee_collectors: [Pubkey; 2],
}
