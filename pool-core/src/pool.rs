//! Pool orchestration
//!
//! Ties the reserve ledger, share book, custody and pricing seams together
//! into the funding API. Each mutating operation validates and computes on a
//! working copy of the ledger, then commits share and ledger state only after
//! every fallible step has passed, so a failed call leaves the pool exactly
//! as it found it.

use crate::config::PoolConfig;
use crate::custody::AssetCustody;
use crate::error::{Error, Result};
use crate::ledger::ReserveLedger;
use crate::metrics::Metrics;
use crate::pricing::PricingCurve;
use crate::shares::{self, ShareBook};
use crate::types::{AccountId, Amount, Asset, Delta, Payout, TargetUpdate};
use std::sync::Arc;

/// Hook invoked after a redemption with a non-empty data field settles.
///
/// The opaque `data` is forwarded untouched; the pool does not interpret it.
/// By the time the hook runs the burn and payouts are final; an error from
/// the callee propagates to the caller but does not unwind them.
pub trait RedemptionCallee: Send + Sync {
    /// Called once per settled redemption carrying data.
    fn on_shares_redeemed(
        &self,
        payer: &AccountId,
        payout_base: Amount,
        payout_quote: Amount,
        data: &[u8],
    ) -> Result<()>;
}

/// A funding pool: two reserves backing one fungible claim.
pub struct Pool {
    config: PoolConfig,
    custody: Arc<dyn AssetCustody>,
    pricing: Arc<dyn PricingCurve>,
    callee: Option<Arc<dyn RedemptionCallee>>,
    metrics: Option<Metrics>,
    ledger: ReserveLedger,
    shares: ShareBook,
}

impl Pool {
    /// Create an empty pool over the given custody and pricing strategy.
    pub fn new(
        config: PoolConfig,
        custody: Arc<dyn AssetCustody>,
        pricing: Arc<dyn PricingCurve>,
    ) -> Self {
        Self {
            config,
            custody,
            pricing,
            callee: None,
            metrics: None,
            ledger: ReserveLedger::new(),
            shares: ShareBook::new(),
        }
    }

    /// Register a redemption callee
    pub fn with_callee(mut self, callee: Arc<dyn RedemptionCallee>) -> Self {
        self.callee = Some(callee);
        self
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Mint shares for whatever was transferred into custody since the last
    /// sync, crediting `recipient`.
    ///
    /// The first successful call seeds the pool: shares equal the base delta
    /// 1:1 and the pricing targets are set to the deposited amounts. Later
    /// calls mint by the smaller of the two proportional contribution ratios.
    pub fn buy_shares(&mut self, recipient: &AccountId) -> Result<Amount> {
        if recipient.is_empty() {
            return Err(Error::RecipientRequired);
        }

        let mut ledger = self.ledger;
        let (base_before, quote_before) = ledger.reserves();
        let (delta_base, delta_quote) = ledger.sync(&*self.custody, TargetUpdate::Recenter)?;
        if delta_base < 0 {
            return Err(Error::NoDepositDetected(Asset::Base));
        }
        if delta_quote < 0 {
            return Err(Error::NoDepositDetected(Asset::Quote));
        }
        let (delta_base, delta_quote) = (delta_base as Amount, delta_quote as Amount);

        let minted = if self.shares.total() == 0 {
            shares::mint_for_seed(delta_base)?
        } else {
            shares::mint_for_top_up(
                self.shares.total(),
                base_before,
                quote_before,
                delta_base,
                delta_quote,
            )?
        };

        self.shares.mint(recipient, minted)?;
        self.ledger = ledger;

        if let Some(metrics) = &self.metrics {
            let (base, quote) = self.ledger.reserves();
            metrics.record_mint(self.shares.total(), base, quote);
        }
        tracing::info!(
            pool = %self.config.name,
            recipient = %recipient,
            minted = %minted,
            delta_base = %delta_base,
            delta_quote = %delta_quote,
            "minted shares"
        );
        Ok(minted)
    }

    /// Burn `shares_to_burn` of `holder`'s shares and pay the pro-rata slice
    /// of both reserves to `recipient`.
    ///
    /// `data` is opaque; when non-empty and a [`RedemptionCallee`] is
    /// registered, the callee runs after the redemption settles. Burning the
    /// entire supply pays out both reserves exactly and returns the pool to
    /// its empty state.
    pub fn sell_shares(
        &mut self,
        holder: &AccountId,
        shares_to_burn: Amount,
        recipient: &AccountId,
        data: &[u8],
    ) -> Result<Payout> {
        if recipient.is_empty() {
            return Err(Error::RecipientRequired);
        }
        if shares_to_burn == 0 {
            return Err(Error::BurnOfZero);
        }
        let held = self.shares.balance_of(holder);
        if held < shares_to_burn {
            return Err(Error::InsufficientShares {
                held,
                requested: shares_to_burn,
            });
        }
        let total = self.shares.total();

        let mut ledger = self.ledger;
        let payout = Payout {
            base: shares::payout_for_burn(ledger.base_reserve(), shares_to_burn, total)?,
            quote: shares::payout_for_burn(ledger.quote_reserve(), shares_to_burn, total)?,
        };

        if payout.base > 0 {
            ledger.transfer_out(&*self.custody, Asset::Base, payout.base, recipient)?;
        }
        if payout.quote > 0 {
            ledger.transfer_out(&*self.custody, Asset::Quote, payout.quote, recipient)?;
        }
        // close on actual balances so the ledger cannot lag its own payouts
        ledger.sync(&*self.custody, TargetUpdate::Recenter)?;

        self.shares.burn(holder, shares_to_burn)?;
        self.ledger = ledger;

        if let Some(metrics) = &self.metrics {
            let (base, quote) = self.ledger.reserves();
            metrics.record_burn(self.shares.total(), base, quote);
        }
        tracing::info!(
            pool = %self.config.name,
            holder = %holder,
            recipient = %recipient,
            burned = %shares_to_burn,
            payout_base = %payout.base,
            payout_quote = %payout.quote,
            "burned shares"
        );

        if !data.is_empty() {
            if let Some(callee) = &self.callee {
                callee.on_shares_redeemed(holder, payout.base, payout.quote, data)?;
            }
        }
        Ok(payout)
    }

    /// Reconcile recorded reserves against custody without minting.
    ///
    /// Captures out-of-band transfers in either direction; pass
    /// [`TargetUpdate::Preserve`] to keep the pricing curve centered where it
    /// was.
    pub fn sync_reserves(&mut self, targets: TargetUpdate) -> Result<(Delta, Delta)> {
        self.ledger.sync(&*self.custody, targets)
    }

    /// Shares held by `account`
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.shares.balance_of(account)
    }

    /// Total shares outstanding
    pub fn total_shares(&self) -> Amount {
        self.shares.total()
    }

    /// Recorded `(base, quote)` reserves
    pub fn get_reserves(&self) -> (Amount, Amount) {
        self.ledger.reserves()
    }

    /// Recorded `(base, quote)` pricing targets
    pub fn get_target_reserves(&self) -> (Amount, Amount) {
        self.ledger.targets()
    }

    /// Mid price from the external pricing strategy, fed with the reserves
    /// and targets as of the last sync.
    pub fn get_mid_price(&self) -> Result<Amount> {
        let (base, quote) = self.ledger.reserves();
        let (target_base, target_quote) = self.ledger.targets();
        self.pricing.mid_price(base, quote, target_base, target_quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::InMemoryCustody;
    use crate::types::ONE;

    struct FixedCurve(Amount);

    impl PricingCurve for FixedCurve {
        fn mid_price(&self, _: Amount, _: Amount, _: Amount, _: Amount) -> Result<Amount> {
            Ok(self.0)
        }
    }

    fn new_pool(custody: &Arc<InMemoryCustody>) -> Pool {
        Pool::new(
            PoolConfig::default(),
            custody.clone() as Arc<dyn AssetCustody>,
            Arc::new(FixedCurve(ONE)),
        )
    }

    #[test]
    fn test_buy_requires_recipient() {
        let custody = Arc::new(InMemoryCustody::new());
        let mut pool = new_pool(&custody);
        custody.deposit(Asset::Base, ONE).unwrap();
        let err = pool.buy_shares(&AccountId::new("")).unwrap_err();
        assert!(matches!(err, Error::RecipientRequired));
        // nothing synced
        assert_eq!(pool.get_reserves(), (0, 0));
    }

    #[test]
    fn test_failed_buy_rolls_back_ledger() {
        let custody = Arc::new(InMemoryCustody::new());
        let mut pool = new_pool(&custody);
        let lp = AccountId::new("lp");
        custody.deposit(Asset::Base, 10 * ONE).unwrap();
        pool.buy_shares(&lp).unwrap();

        // value leaves custody behind the ledger's back
        custody.withdraw(Asset::Base, ONE).unwrap();
        let err = pool.buy_shares(&lp).unwrap_err();
        assert!(matches!(err, Error::NoDepositDetected(Asset::Base)));
        // ledger still shows the pre-failure state
        assert_eq!(pool.get_reserves(), (10 * ONE, 0));
        assert_eq!(pool.total_shares(), 10 * ONE);
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let custody = Arc::new(InMemoryCustody::new());
        let mut pool = new_pool(&custody);
        let lp = AccountId::new("lp");
        let err = pool.buy_shares(&lp).unwrap_err();
        assert!(matches!(err, Error::ZeroDeposit));
    }

    #[test]
    fn test_mid_price_uses_strategy() {
        let custody = Arc::new(InMemoryCustody::new());
        let pool = Pool::new(
            PoolConfig::default(),
            custody.clone() as Arc<dyn AssetCustody>,
            Arc::new(FixedCurve(42 * ONE)),
        );
        assert_eq!(pool.get_mid_price().unwrap(), 42 * ONE);
    }
}
