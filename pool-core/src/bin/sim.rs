//! Funding flow walkthrough binary
//!
//! Seeds an in-memory pool, tops it up with an imbalanced deposit, then
//! redeems half the position. Useful for eyeballing the accounting with
//! `RUST_LOG=debug`.

use anyhow::Context;
use pool_core::{
    math, spawn_pool_actor, AccountId, Asset, InMemoryCustody, Pool, PoolConfig, PricingCurve,
    TargetUpdate, ONE,
};
use std::sync::Arc;

/// Stand-in pricing strategy: plain reserve quotient, no slippage model.
/// Real deployments plug in an actual curve here.
struct SpotRatioCurve;

impl PricingCurve for SpotRatioCurve {
    fn mid_price(
        &self,
        base_reserve: u128,
        quote_reserve: u128,
        _target_base: u128,
        _target_quote: u128,
    ) -> pool_core::Result<u128> {
        if base_reserve == 0 {
            return Ok(ONE);
        }
        math::mul_div_floor(quote_reserve, ONE, base_reserve)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = PoolConfig::from_env().context("loading pool config")?;
    tracing::info!(pool = %config.name, "starting funding walkthrough");

    let custody = Arc::new(InMemoryCustody::new());
    let pool = Pool::new(config, custody.clone(), Arc::new(SpotRatioCurve));
    let handle = spawn_pool_actor(pool);

    let lp = AccountId::new("lp");
    let trader = AccountId::new("trader");

    // Seed: 10 base + 100 quote, shares peg to the base amount
    custody.deposit(Asset::Base, 10 * ONE)?;
    custody.deposit(Asset::Quote, 100 * ONE)?;
    let seeded = handle.buy_shares(lp.clone()).await?;
    tracing::info!(minted = %seeded, "pool seeded");

    // Imbalanced top-up: 10% more base, only 5% more quote
    custody.deposit(Asset::Base, ONE)?;
    custody.deposit(Asset::Quote, 5 * ONE)?;
    let minted = handle.buy_shares(trader.clone()).await?;
    tracing::info!(minted = %minted, "top-up minted on the smaller ratio");

    let (base, quote) = handle.get_reserves().await?;
    let mid = handle.get_mid_price().await?;
    tracing::info!(base = %base, quote = %quote, mid_price = %mid, "pool state");

    // Redeem half the trader's position
    let payout = handle
        .sell_shares(trader.clone(), minted / 2, trader.clone(), Vec::new())
        .await?;
    tracing::info!(
        payout_base = %payout.base,
        payout_quote = %payout.quote,
        "redeemed half the position"
    );

    // A manual re-sync keeps targets pinned while balances drift
    custody.deposit(Asset::Quote, ONE)?;
    let (db, dq) = handle.sync_reserves(TargetUpdate::Preserve).await?;
    tracing::info!(delta_base = db, delta_quote = dq, "out-of-band drift reconciled");

    handle.shutdown().await?;
    tracing::info!("walkthrough complete");
    Ok(())
}
