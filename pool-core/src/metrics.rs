//! Metrics collection for observability
//!
//! Collectors register on a per-instance registry rather than the process
//! default, so multiple pools coexist in one host.

use crate::types::Amount;
use prometheus::{IntCounter, IntGauge, Opts, Registry};
use std::sync::Arc;

/// Metrics collector for one pool
#[derive(Clone)]
pub struct Metrics {
    /// Successful share mints
    pub mints_total: IntCounter,

    /// Successful share burns
    pub burns_total: IntCounter,

    /// Shares outstanding
    pub shares_outstanding: IntGauge,

    /// Recorded base reserve
    pub base_reserve: IntGauge,

    /// Recorded quote reserve
    pub quote_reserve: IntGauge,

    /// Prometheus registry
    registry: Arc<Registry>,
}

impl Metrics {
    /// Create a collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let mints_total = IntCounter::with_opts(Opts::new(
            "pool_share_mints_total",
            "Total successful share mints",
        ))?;
        registry.register(Box::new(mints_total.clone()))?;

        let burns_total = IntCounter::with_opts(Opts::new(
            "pool_share_burns_total",
            "Total successful share burns",
        ))?;
        registry.register(Box::new(burns_total.clone()))?;

        let shares_outstanding = IntGauge::with_opts(Opts::new(
            "pool_shares_outstanding",
            "Claim tokens outstanding (raw units, saturating)",
        ))?;
        registry.register(Box::new(shares_outstanding.clone()))?;

        let base_reserve = IntGauge::with_opts(Opts::new(
            "pool_base_reserve",
            "Recorded base reserve (raw units, saturating)",
        ))?;
        registry.register(Box::new(base_reserve.clone()))?;

        let quote_reserve = IntGauge::with_opts(Opts::new(
            "pool_quote_reserve",
            "Recorded quote reserve (raw units, saturating)",
        ))?;
        registry.register(Box::new(quote_reserve.clone()))?;

        Ok(Self {
            mints_total,
            burns_total,
            shares_outstanding,
            base_reserve,
            quote_reserve,
            registry,
        })
    }

    /// Record a successful mint and the resulting pool state
    pub fn record_mint(&self, total_shares: Amount, base: Amount, quote: Amount) {
        self.mints_total.inc();
        self.set_state(total_shares, base, quote);
    }

    /// Record a successful burn and the resulting pool state
    pub fn record_burn(&self, total_shares: Amount, base: Amount, quote: Amount) {
        self.burns_total.inc();
        self.set_state(total_shares, base, quote);
    }

    fn set_state(&self, total_shares: Amount, base: Amount, quote: Amount) {
        self.shares_outstanding.set(gauge_value(total_shares));
        self.base_reserve.set(gauge_value(base));
        self.quote_reserve.set(gauge_value(quote));
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Gauges are i64; amounts saturate at the top of that range.
fn gauge_value(amount: Amount) -> i64 {
    amount.min(i64::MAX as Amount) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_record() {
        let metrics = Metrics::new().unwrap();
        metrics.record_mint(100, 40, 60);
        metrics.record_mint(150, 60, 90);
        metrics.record_burn(75, 30, 45);

        assert_eq!(metrics.mints_total.get(), 2);
        assert_eq!(metrics.burns_total.get(), 1);
        assert_eq!(metrics.shares_outstanding.get(), 75);
        assert_eq!(metrics.quote_reserve.get(), 45);
    }

    #[test]
    fn test_gauge_saturates() {
        assert_eq!(gauge_value(Amount::MAX), i64::MAX);
        assert_eq!(gauge_value(7), 7);
    }

    #[test]
    fn test_independent_registries() {
        // two pools, two collectors, no registration clash
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_mint(1, 1, 1);
        assert_eq!(b.mints_total.get(), 0);
    }
}
