//! Pool funding core
//!
//! A liquidity pool's funding module: two reserve balances (base and quote)
//! back one fungible claim token, shares are minted on deposit and burned on
//! withdrawal.
//!
//! # Architecture
//!
//! - **Reserve Ledger**: recorded base/quote reserves plus the target
//!   reserves the external pricing strategy centers on; syncs against actual
//!   custody balances and surfaces the delta since the last sync
//! - **Share Accounting Engine**: converts deposit deltas into share mints
//!   (minimum-ratio policy) and burn requests into pro-rata payouts
//! - **Single Writer**: one actor task per pool serializes every operation
//!
//! # Invariants
//!
//! - A pool with zero shares outstanding has zero reserves
//! - Supply changes only via explicit mint or burn
//! - All rounding floors toward the pool, never toward the actor
//! - Recorded reserves equal custody balances immediately after a sync
//!
//! # Example
//!
//! ```
//! use pool_core::{AccountId, Asset, InMemoryCustody, Pool, PoolConfig, PricingCurve, ONE};
//! use std::sync::Arc;
//!
//! struct FlatCurve;
//!
//! impl PricingCurve for FlatCurve {
//!     fn mid_price(&self, _: u128, _: u128, _: u128, _: u128) -> pool_core::Result<u128> {
//!         Ok(ONE)
//!     }
//! }
//!
//! fn main() -> pool_core::Result<()> {
//!     let custody = Arc::new(InMemoryCustody::new());
//!     let mut pool = Pool::new(PoolConfig::default(), custody.clone(), Arc::new(FlatCurve));
//!
//!     custody.deposit(Asset::Base, 10 * ONE)?;
//!     let minted = pool.buy_shares(&AccountId::new("lp"))?;
//!     assert_eq!(minted, 10 * ONE);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod actor;
pub mod config;
pub mod custody;
pub mod error;
pub mod ledger;
pub mod math;
pub mod metrics;
pub mod pool;
pub mod pricing;
pub mod shares;
pub mod types;

// Re-exports
pub use actor::{spawn_pool_actor, PoolActor, PoolHandle, PoolMessage};
pub use config::PoolConfig;
pub use custody::{AssetCustody, InMemoryCustody};
pub use error::{Error, Result};
pub use ledger::ReserveLedger;
pub use metrics::Metrics;
pub use pool::{Pool, RedemptionCallee};
pub use pricing::PricingCurve;
pub use shares::ShareBook;
pub use types::{AccountId, Amount, Asset, Delta, Payout, TargetUpdate, ONE};
