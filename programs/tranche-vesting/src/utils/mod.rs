pub mod claim;
pub mod math;
pub mod schedule;
