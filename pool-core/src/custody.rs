//! Asset custody seam
//!
//! The pool never touches token mechanics directly. It reads its own custody
//! balances and orders outbound transfers through [`AssetCustody`]; anything
//! behind that trait (a token bridge, a settlement rail, the in-memory book
//! below) is an external collaborator. Depositors fund the pool by crediting
//! its custody accounts out-of-band *before* calling a funding operation.

use crate::error::{Error, Result};
use crate::types::{AccountId, Amount, Asset};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Custody of the pool's own asset accounts.
///
/// Implementations must apply `transfer` atomically: either the full amount
/// moves or the balance is untouched.
pub trait AssetCustody: Send + Sync {
    /// Current custody balance held by the pool for `asset`.
    fn balance_of(&self, asset: Asset) -> Result<Amount>;

    /// Move `amount` of `asset` out of pool custody to `to`.
    fn transfer(&self, asset: Asset, to: &AccountId, amount: Amount) -> Result<()>;
}

/// In-memory custody book used by tests and the demo binary.
///
/// Shared behind an `Arc`; the lock scope is a single balance move, so the
/// pool's own serialization (one writer per pool) is what keeps funding
/// operations atomic.
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    book: RwLock<Book>,
}

#[derive(Debug, Default)]
struct Book {
    /// Pool custody per asset
    held: HashMap<Asset, Amount>,
    /// Balances credited to external accounts by payouts
    accounts: HashMap<(Asset, AccountId), Amount>,
}

impl InMemoryCustody {
    /// Empty custody book
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit pool custody, simulating an inbound transfer made by a
    /// depositor before invoking a funding operation.
    pub fn deposit(&self, asset: Asset, amount: Amount) -> Result<()> {
        let mut book = self.book.write();
        let held = book.held.entry(asset).or_insert(0);
        *held = held.checked_add(amount).ok_or(Error::Overflow)?;
        Ok(())
    }

    /// Debit pool custody without a payout, simulating value leaving through
    /// a channel the ledger has not seen yet (e.g. a trade leg).
    pub fn withdraw(&self, asset: Asset, amount: Amount) -> Result<()> {
        let mut book = self.book.write();
        let held = book.held.entry(asset).or_insert(0);
        *held = held.checked_sub(amount).ok_or_else(|| {
            Error::Custody(format!("cannot withdraw {amount} {asset} from custody"))
        })?;
        Ok(())
    }

    /// Balance credited to an external account by past payouts.
    pub fn account_balance(&self, asset: Asset, account: &AccountId) -> Amount {
        self.book
            .read()
            .accounts
            .get(&(asset, account.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl AssetCustody for InMemoryCustody {
    fn balance_of(&self, asset: Asset) -> Result<Amount> {
        Ok(self.book.read().held.get(&asset).copied().unwrap_or(0))
    }

    fn transfer(&self, asset: Asset, to: &AccountId, amount: Amount) -> Result<()> {
        let mut book = self.book.write();
        let held = book.held.entry(asset).or_insert(0);
        let remaining = held.checked_sub(amount).ok_or_else(|| {
            Error::Custody(format!("custody short of {asset}: transfer of {amount}"))
        })?;
        *held = remaining;
        let credited = book.accounts.entry((asset, to.clone())).or_insert(0);
        *credited = credited.checked_add(amount).ok_or(Error::Overflow)?;
        Ok(())
    }
}
