//! Error types for the pool funding module

use crate::types::{Amount, Asset};
use thiserror::Error;

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pool funding errors
///
/// Every error is reported synchronously and leaves ledger and share state
/// exactly as it was before the failed operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Deposit present but nothing mintable (both deltas zero, or the
    /// proportional mint floors to zero)
    #[error("deposit produced no mintable shares")]
    ZeroDeposit,

    /// Custody balance decreased since the last sync on the deposit path
    #[error("no deposit detected: {0} custody balance decreased since last sync")]
    NoDepositDetected(Asset),

    /// No destination account supplied for a mint or payout
    #[error("recipient account required")]
    RecipientRequired,

    /// Burn request exceeds the holder's share balance
    #[error("insufficient shares: held {held}, requested {requested}")]
    InsufficientShares {
        /// Shares currently held by the account
        held: Amount,
        /// Shares the caller asked to burn
        requested: Amount,
    },

    /// Burn of zero shares
    #[error("cannot burn zero shares")]
    BurnOfZero,

    /// Payout exceeds the recorded reserve
    #[error("insufficient {asset} reserve: available {available}, requested {requested}")]
    InsufficientReserve {
        /// Asset whose reserve was exceeded
        asset: Asset,
        /// Reserve recorded in the ledger
        available: Amount,
        /// Amount the transfer asked for
        requested: Amount,
    },

    /// Arithmetic result outside the representable amount range
    #[error("arithmetic overflow")]
    Overflow,

    /// Custody backend failure
    #[error("custody error: {0}")]
    Custody(String),

    /// Concurrency error (actor mailbox closed, etc.)
    #[error("concurrency error: {0}")]
    Concurrency(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
