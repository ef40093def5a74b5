//! External pricing seam
//!
//! The curve that turns reserves into a mid price is not part of this core.
//! The pool only guarantees that the reserve and target values it feeds to
//! the strategy are accurate as of the last sync.

use crate::error::Result;
use crate::types::Amount;

/// Pluggable mid-price strategy.
///
/// Must be a pure function of its four inputs: same reserves and targets,
/// same price.
pub trait PricingCurve: Send + Sync {
    /// Reference exchange rate between base and quote, as an 18-decimal
    /// fixed-point quote-per-base value.
    fn mid_price(
        &self,
        base_reserve: Amount,
        quote_reserve: Amount,
        target_base: Amount,
        target_quote: Amount,
    ) -> Result<Amount>;
}
