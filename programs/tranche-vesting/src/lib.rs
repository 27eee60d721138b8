use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use instructions::*;
pub use state::*;

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod tranche_vesting {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        manager: Pubkey,
        fee_collectors: [Pubkey; 2],
        config: ScheduleConfig,
    ) -> Result<()> {
        instructions::initialize::initialize(ctx, manager, fee_collectors, config)
    }

    pub fn whitelist(
        ctx: Context<Whitelist>,
        wallets: Vec<Pubkey>,
        allocations: Vec<u64>,
        batch2_delay_flags: Vec<bool>,
        initial_fees: Vec<u64>,
        is_final: bool,
    ) -> Result<()> {
        instructions::whitelist::whitelist(
            ctx,
            wallets,
            allocations,
            batch2_delay_flags,
            initial_fees,
            is_final,
        )
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::claim(ctx)
    }

    pub fn claim_for(ctx: Context<Claim>, beneficiary: Pubkey) -> Result<()> {
        instructions::claim::claim_for(ctx, beneficiary)
    }

    pub fn claim_with_extra(ctx: Context<Claim>, extra_amount: u64) -> Result<()> {
        instructions::claim::claim_with_extra(ctx, extra_amount)
    }

    pub fn eliminate(ctx: Context<Eliminate>, wallets: Vec<Pubkey>) -> Result<()> {
        instructions::eliminate::eliminate(ctx, wallets)
    }

    pub fn collect_fees(ctx: Context<CollectFees>, wallets: Vec<Pubkey>) -> Result<()> {
        instructions::collect_fees::collect_fees(ctx, wallets)
    }

    pub fn switch_fee_collectors(ctx: Context<SwitchFeeCollectors>) -> Result<()> {
        instructions::switch_fee_collectors::switch_fee_collectors(ctx)
    }

    pub fn set_burn_rate(ctx: Context<SetBurnRate>, burn_rate: u16) -> Result<()> {
        instructions::set_burn_rate::set_burn_rate(ctx, burn_rate)
    }

    pub fn set_locked_claimable_offset(
        ctx: Context<SetLockedClaimableOffset>,
        offset: i64,
    ) -> Result<()> {
        instructions::set_locked_claimable_offset::set_locked_claimable_offset(ctx, offset)
    }

    pub fn set_manager(ctx: Context<SetManager>, new_manager: Pubkey) -> Result<()> {
        instructions::set_manager::set_manager(ctx, new_manager)
    }

    pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, wallet: Pubkey) -> Result<()> {
        instructions::emit_vesting_quote::emit_vesting_quote(ctx, wallet)
    }
}
