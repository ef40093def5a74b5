//! Reserve Ledger
//!
//! Tracks the pool's recorded base/quote reserves and the target reserves the
//! pricing strategy centers on. The recorded values equal actual custody
//! balances immediately after a sync; between syncs they may lag behind
//! out-of-band transfers, and the next sync surfaces the difference as a pair
//! of signed deltas.

use crate::custody::AssetCustody;
use crate::error::{Error, Result};
use crate::types::{AccountId, Amount, Asset, Delta, TargetUpdate};

/// Recorded reserves and pricing targets for one pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReserveLedger {
    base_reserve: Amount,
    quote_reserve: Amount,
    target_base: Amount,
    target_quote: Amount,
}

impl ReserveLedger {
    /// Empty ledger (all zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded base reserve
    pub fn base_reserve(&self) -> Amount {
        self.base_reserve
    }

    /// Recorded quote reserve
    pub fn quote_reserve(&self) -> Amount {
        self.quote_reserve
    }

    /// Recorded reserve for one asset
    pub fn reserve(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Base => self.base_reserve,
            Asset::Quote => self.quote_reserve,
        }
    }

    /// Both recorded reserves, read together
    pub fn reserves(&self) -> (Amount, Amount) {
        (self.base_reserve, self.quote_reserve)
    }

    /// Both pricing targets, read together
    pub fn targets(&self) -> (Amount, Amount) {
        (self.target_base, self.target_quote)
    }

    /// Reconcile recorded reserves against actual custody balances.
    ///
    /// Returns `(delta_base, delta_quote)`, what moved since the last sync;
    /// negative values mean assets left custody. The recorded reserves are
    /// overwritten with the observed balances, and the targets follow unless
    /// the caller passes [`TargetUpdate::Preserve`]. Calling twice with no
    /// intervening transfer yields zero deltas.
    pub fn sync(
        &mut self,
        custody: &dyn AssetCustody,
        targets: TargetUpdate,
    ) -> Result<(Delta, Delta)> {
        let actual_base = custody.balance_of(Asset::Base)?;
        let actual_quote = custody.balance_of(Asset::Quote)?;
        let delta_base = signed_delta(actual_base, self.base_reserve)?;
        let delta_quote = signed_delta(actual_quote, self.quote_reserve)?;

        self.base_reserve = actual_base;
        self.quote_reserve = actual_quote;
        if targets == TargetUpdate::Recenter {
            self.target_base = actual_base;
            self.target_quote = actual_quote;
        }

        tracing::debug!(
            base = %actual_base,
            quote = %actual_quote,
            delta_base,
            delta_quote,
            "synced reserves"
        );
        Ok((delta_base, delta_quote))
    }

    /// Pay `amount` of `asset` out of custody and decrement the matching
    /// reserve. Targets are left alone; the enclosing operation decides
    /// whether its closing sync re-centers them.
    pub fn transfer_out(
        &mut self,
        custody: &dyn AssetCustody,
        asset: Asset,
        amount: Amount,
        to: &AccountId,
    ) -> Result<()> {
        let available = self.reserve(asset);
        if amount > available {
            return Err(Error::InsufficientReserve {
                asset,
                available,
                requested: amount,
            });
        }
        custody.transfer(asset, to, amount)?;
        match asset {
            Asset::Base => self.base_reserve -= amount,
            Asset::Quote => self.quote_reserve -= amount,
        }
        Ok(())
    }
}

fn signed_delta(actual: Amount, recorded: Amount) -> Result<Delta> {
    if actual >= recorded {
        Delta::try_from(actual - recorded).map_err(|_| Error::Overflow)
    } else {
        Delta::try_from(recorded - actual)
            .map(|d| -d)
            .map_err(|_| Error::Overflow)
    }
}
