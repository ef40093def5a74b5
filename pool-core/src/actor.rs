//! Actor-based concurrency for pool instances
//!
//! A pool is a single serialized state machine: every mutating operation
//! reads reserve and supply state and writes it back non-atomically with
//! respect to external transfers, so no two of them may interleave. This
//! module implements that domain with the single-writer pattern: one Tokio
//! task owns the [`Pool`], a cloneable [`PoolHandle`] sends messages into a
//! bounded mailbox, and reads flow through the same mailbox so they always
//! observe a consistent snapshot (reserves and targets together, never torn).

use crate::pool::Pool;
use crate::types::{AccountId, Amount, Delta, Payout, TargetUpdate};
use crate::{Error, Result};
use tokio::sync::{mpsc, oneshot};

/// Message sent to the pool actor
pub enum PoolMessage {
    /// Mint shares for the latest custody delta
    BuyShares {
        /// Account credited with the minted shares
        recipient: AccountId,
        /// Reply channel
        response: oneshot::Sender<Result<Amount>>,
    },

    /// Burn shares and pay out reserves
    SellShares {
        /// Account whose shares are burned
        holder: AccountId,
        /// Shares to burn
        shares: Amount,
        /// Account receiving the payouts
        recipient: AccountId,
        /// Opaque data forwarded to the redemption callee
        data: Vec<u8>,
        /// Reply channel
        response: oneshot::Sender<Result<Payout>>,
    },

    /// Reconcile recorded reserves against custody
    SyncReserves {
        /// Whether to re-center the pricing targets
        targets: TargetUpdate,
        /// Reply channel
        response: oneshot::Sender<Result<(Delta, Delta)>>,
    },

    /// Get one account's share balance
    BalanceOf {
        /// Account to look up
        account: AccountId,
        /// Reply channel
        response: oneshot::Sender<Amount>,
    },

    /// Get total shares outstanding
    TotalShares {
        /// Reply channel
        response: oneshot::Sender<Amount>,
    },

    /// Get recorded reserves
    GetReserves {
        /// Reply channel
        response: oneshot::Sender<(Amount, Amount)>,
    },

    /// Get recorded pricing targets
    GetTargetReserves {
        /// Reply channel
        response: oneshot::Sender<(Amount, Amount)>,
    },

    /// Get the externally computed mid price
    GetMidPrice {
        /// Reply channel
        response: oneshot::Sender<Result<Amount>>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that owns a pool and processes its messages
pub struct PoolActor {
    pool: Pool,
    mailbox: mpsc::Receiver<PoolMessage>,
}

impl PoolActor {
    /// Create new actor
    pub fn new(pool: Pool, mailbox: mpsc::Receiver<PoolMessage>) -> Self {
        Self { pool, mailbox }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            match msg {
                PoolMessage::Shutdown => break,
                _ => self.handle_message(msg),
            }
        }
    }

    /// Handle a single message
    fn handle_message(&mut self, msg: PoolMessage) {
        match msg {
            PoolMessage::BuyShares {
                recipient,
                response,
            } => {
                let _ = response.send(self.pool.buy_shares(&recipient));
            }

            PoolMessage::SellShares {
                holder,
                shares,
                recipient,
                data,
                response,
            } => {
                let _ = response.send(self.pool.sell_shares(&holder, shares, &recipient, &data));
            }

            PoolMessage::SyncReserves { targets, response } => {
                let _ = response.send(self.pool.sync_reserves(targets));
            }

            PoolMessage::BalanceOf { account, response } => {
                let _ = response.send(self.pool.balance_of(&account));
            }

            PoolMessage::TotalShares { response } => {
                let _ = response.send(self.pool.total_shares());
            }

            PoolMessage::GetReserves { response } => {
                let _ = response.send(self.pool.get_reserves());
            }

            PoolMessage::GetTargetReserves { response } => {
                let _ = response.send(self.pool.get_target_reserves());
            }

            PoolMessage::GetMidPrice { response } => {
                let _ = response.send(self.pool.get_mid_price());
            }

            PoolMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }
}

/// Handle for sending messages to the actor
#[derive(Clone)]
pub struct PoolHandle {
    sender: mpsc::Sender<PoolMessage>,
}

impl PoolHandle {
    /// Create new handle
    pub fn new(sender: mpsc::Sender<PoolMessage>) -> Self {
        Self { sender }
    }

    /// Mint shares for the latest custody delta
    pub async fn buy_shares(&self, recipient: AccountId) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::BuyShares {
                recipient,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Burn shares and pay out reserves
    pub async fn sell_shares(
        &self,
        holder: AccountId,
        shares: Amount,
        recipient: AccountId,
        data: Vec<u8>,
    ) -> Result<Payout> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::SellShares {
                holder,
                shares,
                recipient,
                data,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Reconcile recorded reserves against custody
    pub async fn sync_reserves(&self, targets: TargetUpdate) -> Result<(Delta, Delta)> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::SyncReserves {
                targets,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Get one account's share balance
    pub async fn balance_of(&self, account: AccountId) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::BalanceOf {
                account,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get total shares outstanding
    pub async fn total_shares(&self) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::TotalShares { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get recorded reserves
    pub async fn get_reserves(&self) -> Result<(Amount, Amount)> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::GetReserves { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get recorded pricing targets
    pub async fn get_target_reserves(&self) -> Result<(Amount, Amount)> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::GetTargetReserves { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Get the externally computed mid price
    pub async fn get_mid_price(&self) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PoolMessage::GetMidPrice { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(PoolMessage::Shutdown)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;
        Ok(())
    }
}

/// Spawn the pool actor
pub fn spawn_pool_actor(pool: Pool) -> PoolHandle {
    let depth = pool.config().mailbox_depth.max(1);
    let (tx, rx) = mpsc::channel(depth);
    let actor = PoolActor::new(pool, rx);

    tokio::spawn(async move {
        actor.run().await;
    });

    PoolHandle::new(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::custody::{AssetCustody, InMemoryCustody};
    use crate::pricing::PricingCurve;
    use crate::types::{Asset, ONE};
    use std::sync::Arc;

    struct FixedCurve(Amount);

    impl PricingCurve for FixedCurve {
        fn mid_price(&self, _: Amount, _: Amount, _: Amount, _: Amount) -> Result<Amount> {
            Ok(self.0)
        }
    }

    fn spawn_test_pool(custody: &Arc<InMemoryCustody>) -> PoolHandle {
        let pool = Pool::new(
            PoolConfig::default(),
            custody.clone() as Arc<dyn AssetCustody>,
            Arc::new(FixedCurve(ONE)),
        );
        spawn_pool_actor(pool)
    }

    #[tokio::test]
    async fn test_actor_spawn_and_shutdown() {
        let custody = Arc::new(InMemoryCustody::new());
        let handle = spawn_test_pool(&custody);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_actor_funding_round_trip() {
        let custody = Arc::new(InMemoryCustody::new());
        let handle = spawn_test_pool(&custody);
        let lp = AccountId::new("lp");
        let bob = AccountId::new("bob");

        custody.deposit(Asset::Base, 10 * ONE).unwrap();
        custody.deposit(Asset::Quote, 100 * ONE).unwrap();
        let minted = handle.buy_shares(lp.clone()).await.unwrap();
        assert_eq!(minted, 10 * ONE);
        assert_eq!(handle.get_reserves().await.unwrap(), (10 * ONE, 100 * ONE));

        let payout = handle
            .sell_shares(lp.clone(), minted, bob.clone(), Vec::new())
            .await
            .unwrap();
        assert_eq!(payout.base, 10 * ONE);
        assert_eq!(payout.quote, 100 * ONE);
        assert_eq!(handle.total_shares().await.unwrap(), 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_cloned_handles_share_one_pool() {
        let custody = Arc::new(InMemoryCustody::new());
        let handle = spawn_test_pool(&custody);
        let reader = handle.clone();
        let lp = AccountId::new("lp");

        custody.deposit(Asset::Base, 3 * ONE).unwrap();
        handle.buy_shares(lp.clone()).await.unwrap();

        assert_eq!(reader.balance_of(lp).await.unwrap(), 3 * ONE);
        assert_eq!(reader.get_target_reserves().await.unwrap(), (3 * ONE, 0));
        assert_eq!(reader.get_mid_price().await.unwrap(), ONE);

        handle.shutdown().await.unwrap();
    }
}
