//! Checked fixed-point helpers. Intermediates are widened to `u128`.

use crate::constants::PERMILLE;
use crate::error::VestingError;

/// `floor(a * b / d)`.
pub fn mul_div(a: u64, b: u64, d: u64) -> Result<u64, VestingError> {
    if d == 0 {
        return Err(VestingError::MathOverflow);
    }
    let v = (a as u128)
        .checked_mul(b as u128)
        .ok_or(VestingError::MathOverflow)?
        / (d as u128);
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// `ceil(a * b / d)`.
pub fn mul_div_ceil(a: u64, b: u64, d: u64) -> Result<u64, VestingError> {
    if d == 0 {
        return Err(VestingError::MathOverflow);
    }
    let d = d as u128;
    let v = (a as u128)
        .checked_mul(b as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_add(d - 1)
        .ok_or(VestingError::MathOverflow)?
        / d;
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// `floor(amount * permille / 1000)`.
pub fn permille_of(amount: u64, permille: u16) -> Result<u64, VestingError> {
    mul_div(amount, u64::from(permille), PERMILLE)
}

pub fn add(a: u64, b: u64) -> Result<u64, VestingError> {
    a.checked_add(b).ok_or(VestingError::MathOverflow)
}
