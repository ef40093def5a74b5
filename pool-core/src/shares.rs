//! Share Accounting Engine
//!
//! Converts reserve deltas into share mints and burn requests into reserve
//! payouts. The holder book is plain state; the conversion rules live in the
//! free functions so they stay pure and directly testable.
//!
//! # Mint policy
//!
//! The first deposit seeds the pool: shares are pegged 1:1 to the base delta,
//! whatever quote rides along. Every later deposit mints by the *smaller* of
//! the two proportional contribution ratios, so over-supplying one asset
//! cannot mint extra claim: the excess stays in the pool as backing without
//! a matching claim. Ratios are computed as 18-decimal fixed-point values and
//! floored twice (ratio, then shares), which is what keeps rounding losses on
//! the depositor's side of the line.

use crate::error::{Error, Result};
use crate::math::{checked_add, mul_div_floor, mul_ratio_floor, ratio_floor};
use crate::types::{AccountId, Amount};
use std::collections::HashMap;

/// Holder balances plus the total claim outstanding.
///
/// Invariant: the sum of all balances equals `total`.
#[derive(Debug, Default)]
pub struct ShareBook {
    balances: HashMap<AccountId, Amount>,
    total: Amount,
}

impl ShareBook {
    /// Empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Total claim outstanding
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Shares held by one account
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Number of accounts with a non-zero balance
    pub fn holders(&self) -> usize {
        self.balances.len()
    }

    /// Credit `amount` freshly minted shares to `to`.
    pub fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<()> {
        let new_total = checked_add(self.total, amount)?;
        let new_balance = checked_add(self.balance_of(to), amount)?;
        self.total = new_total;
        self.balances.insert(to.clone(), new_balance);
        Ok(())
    }

    /// Remove `amount` shares from `from` and from the total.
    pub fn burn(&mut self, from: &AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(Error::BurnOfZero);
        }
        let held = self.balance_of(from);
        if held < amount {
            return Err(Error::InsufficientShares {
                held,
                requested: amount,
            });
        }
        // total >= held >= amount by construction
        self.total -= amount;
        let remaining = held - amount;
        if remaining == 0 {
            self.balances.remove(from);
        } else {
            self.balances.insert(from.clone(), remaining);
        }
        Ok(())
    }
}

/// Shares minted by the deposit that seeds an empty pool: the base delta,
/// 1:1. A seed without base would mint nothing against live backing, so it
/// is rejected.
pub fn mint_for_seed(delta_base: Amount) -> Result<Amount> {
    if delta_base == 0 {
        return Err(Error::ZeroDeposit);
    }
    Ok(delta_base)
}

/// Shares minted by a deposit into an already-seeded pool.
///
/// `base_before`/`quote_before` are the reserves recorded *before* the sync
/// that produced the deltas. A zero reserve makes that side's ratio
/// non-binding. Deposits that floor to zero minted shares are rejected
/// outright rather than silently absorbed.
pub fn mint_for_top_up(
    total: Amount,
    base_before: Amount,
    quote_before: Amount,
    delta_base: Amount,
    delta_quote: Amount,
) -> Result<Amount> {
    if delta_base == 0 && delta_quote == 0 {
        return Err(Error::ZeroDeposit);
    }
    let base_ratio = match base_before {
        0 => None,
        _ => Some(ratio_floor(delta_base, base_before)?),
    };
    let quote_ratio = match quote_before {
        0 => None,
        _ => Some(ratio_floor(delta_quote, quote_before)?),
    };
    let mint_ratio = match (base_ratio, quote_ratio) {
        (Some(b), Some(q)) => b.min(q),
        (Some(b), None) => b,
        (None, Some(q)) => q,
        (None, None) => return Err(Error::ZeroDeposit),
    };
    let minted = mul_ratio_floor(total, mint_ratio)?;
    if minted == 0 {
        return Err(Error::ZeroDeposit);
    }
    Ok(minted)
}

/// Pro-rata payout of one reserve for a burn: `floor(reserve * shares / total)`.
pub fn payout_for_burn(reserve: Amount, shares: Amount, total: Amount) -> Result<Amount> {
    mul_div_floor(reserve, shares, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ONE;

    #[test]
    fn test_book_mint_and_burn() {
        let mut book = ShareBook::new();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");

        book.mint(&alice, 100).unwrap();
        book.mint(&bob, 40).unwrap();
        book.mint(&alice, 10).unwrap();
        assert_eq!(book.total(), 150);
        assert_eq!(book.balance_of(&alice), 110);
        assert_eq!(book.holders(), 2);

        book.burn(&alice, 110).unwrap();
        assert_eq!(book.balance_of(&alice), 0);
        assert_eq!(book.holders(), 1);
        assert_eq!(book.total(), 40);
    }

    #[test]
    fn test_book_burn_errors() {
        let mut book = ShareBook::new();
        let alice = AccountId::new("alice");
        book.mint(&alice, 5).unwrap();

        assert!(matches!(book.burn(&alice, 0), Err(Error::BurnOfZero)));
        assert!(matches!(
            book.burn(&alice, 6),
            Err(Error::InsufficientShares {
                held: 5,
                requested: 6,
            })
        ));
        assert_eq!(book.total(), 5);
    }

    #[test]
    fn test_seed_mints_base_one_to_one() {
        assert_eq!(mint_for_seed(10 * ONE).unwrap(), 10 * ONE);
        assert!(matches!(mint_for_seed(0), Err(Error::ZeroDeposit)));
    }

    #[test]
    fn test_top_up_balanced() {
        // 10% on both sides of a 100/200 pool with 50 shares out
        let minted = mint_for_top_up(50 * ONE, 100 * ONE, 200 * ONE, 10 * ONE, 20 * ONE).unwrap();
        assert_eq!(minted, 5 * ONE);
    }

    #[test]
    fn test_top_up_minimum_ratio_binds() {
        // quote side only contributes 5%
        let minted = mint_for_top_up(50 * ONE, 100 * ONE, 200 * ONE, 10 * ONE, 10 * ONE).unwrap();
        assert_eq!(minted, 25 * ONE / 10);
        // base side only contributes 5%
        let minted = mint_for_top_up(50 * ONE, 100 * ONE, 200 * ONE, 5 * ONE, 20 * ONE).unwrap();
        assert_eq!(minted, 25 * ONE / 10);
    }

    #[test]
    fn test_top_up_zero_reserve_side_is_non_binding() {
        // base-only pool: quote deposit carries no claim of its own
        let minted = mint_for_top_up(10 * ONE, 10 * ONE, 0, ONE, 5 * ONE).unwrap();
        assert_eq!(minted, ONE);
    }

    #[test]
    fn test_top_up_rejects_empty_and_dust() {
        assert!(matches!(
            mint_for_top_up(10 * ONE, 10 * ONE, 0, 0, 0),
            Err(Error::ZeroDeposit)
        ));
        // deposit too small for a single share unit
        assert!(matches!(
            mint_for_top_up(1, 10 * ONE, 0, ONE / 100, 0),
            Err(Error::ZeroDeposit)
        ));
    }

    #[test]
    fn test_payout_full_exit_is_exact() {
        assert_eq!(payout_for_burn(123_456, 10 * ONE, 10 * ONE).unwrap(), 123_456);
    }

    #[test]
    fn test_payout_floors() {
        // 10 * 1 / 3 = 3.33 floors to 3
        assert_eq!(payout_for_burn(10, 1, 3).unwrap(), 3);
    }
}
