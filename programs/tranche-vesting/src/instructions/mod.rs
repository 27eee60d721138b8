pub mod initialize;
pub mod whitelist;
pub mod claim;
pub mod eliminate;
pub mod collect_fees;
pub mod switch_fee_collectors;
pub mod set_burn_rate;
pub mod set_locked_claimable_offset;
pub mod set_manager;
pub mod emit_vesting_quote;

pub use initialize::*;
pub use whitelist::*;
pub use claim::*;
pub use eliminate::*;
pub use collect_fees::*;
pub use switch_fee_collectors::*;
pub use set_burn_rate::*;
pub use set_locked_claimable_offset::*;
pub use set_manager::*;
pub use emit_vesting_quote::*;
