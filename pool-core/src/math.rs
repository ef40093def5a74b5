//! Checked 18-decimal fixed-point arithmetic
//!
//! All rounding floors, so value rounds toward the pool and never toward the
//! actor. Intermediates are widened to 256 bits; an operation only fails when
//! its *result* does not fit the amount range.

use crate::error::{Error, Result};
use crate::types::{Amount, ONE};
use primitive_types::U256;

/// Exact `floor(a * b / c)`.
///
/// Returns [`Error::Overflow`] when the quotient exceeds `u128::MAX` or when
/// `c == 0`.
pub fn mul_div_floor(a: Amount, b: Amount, c: Amount) -> Result<Amount> {
    if c == 0 {
        return Err(Error::Overflow);
    }
    // 128x128 cannot overflow 256 bits
    let out = (U256::from(a) * U256::from(b)) / U256::from(c);
    if out > U256::from(Amount::MAX) {
        return Err(Error::Overflow);
    }
    Ok(out.low_u128())
}

/// Fixed-point ratio `floor(part * ONE / whole)`.
pub fn ratio_floor(part: Amount, whole: Amount) -> Result<Amount> {
    mul_div_floor(part, ONE, whole)
}

/// Apply a fixed-point ratio: `floor(amount * ratio / ONE)`.
pub fn mul_ratio_floor(amount: Amount, ratio: Amount) -> Result<Amount> {
    mul_div_floor(amount, ratio, ONE)
}

/// Checked addition of two amounts.
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b).ok_or(Error::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor_exact() {
        assert_eq!(mul_div_floor(10, 3, 2).unwrap(), 15);
        assert_eq!(mul_div_floor(10, 3, 4).unwrap(), 7); // 30/4 = 7.5 floors
        assert_eq!(mul_div_floor(0, 1_000, 7).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_floor_wide_intermediate() {
        // 100e18 * 10e18 overflows u128 but the quotient fits
        let reserve = 100 * ONE;
        let shares = 10 * ONE;
        let total = 10 * ONE;
        assert_eq!(mul_div_floor(reserve, shares, total).unwrap(), reserve);
    }

    #[test]
    fn test_mul_div_floor_overflowing_result() {
        assert!(matches!(
            mul_div_floor(Amount::MAX, Amount::MAX, 1),
            Err(Error::Overflow)
        ));
    }

    #[test]
    fn test_mul_div_floor_zero_divisor() {
        assert!(matches!(mul_div_floor(1, 1, 0), Err(Error::Overflow)));
    }

    #[test]
    fn test_two_step_ratio_rounding() {
        // A one-unit-short ratio propagates into a ten-unit-short mint
        let part: Amount = 805_128_378_416_116_286;
        let whole: Amount = 8_051_283_784_161_162_863;
        let ratio = ratio_floor(part, whole).unwrap();
        assert_eq!(ratio, 99_999_999_999_999_999);
        assert_eq!(
            mul_ratio_floor(10 * ONE, ratio).unwrap(),
            999_999_999_999_999_990
        );
    }

    #[test]
    fn test_ratio_floor_exact_fraction() {
        assert_eq!(ratio_floor(10 * ONE, 200 * ONE).unwrap(), ONE / 20);
    }

    #[test]
    fn test_checked_add_overflow() {
        assert!(matches!(checked_add(Amount::MAX, 1), Err(Error::Overflow)));
        assert_eq!(checked_add(2, 3).unwrap(), 5);
    }
}
