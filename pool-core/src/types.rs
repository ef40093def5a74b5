//! Core types for the pool funding module
//!
//! Amounts are unsigned 18-decimal fixed-point quantities carried as raw
//! `u128` units. All arithmetic on them is checked; see [`crate::math`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw 18-decimal fixed-point quantity (1 token == [`ONE`] units).
pub type Amount = u128;

/// Signed balance delta between two ledger syncs.
pub type Delta = i128;

/// One whole token in raw units (10^18).
pub const ONE: Amount = 1_000_000_000_000_000_000;

/// Account identifier (opaque, compared byte-for-byte)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty ID is the "no destination supplied" sentinel.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two assets backing a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// Base asset (shares are pegged 1:1 to it on the first deposit)
    Base,
    /// Quote asset
    Quote,
}

impl Asset {
    /// Short label for logs and metrics
    pub fn code(&self) -> &'static str {
        match self {
            Asset::Base => "base",
            Asset::Quote => "quote",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Whether a reserve sync re-centers the pricing targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetUpdate {
    /// Move `target_base`/`target_quote` to the freshly observed reserves
    Recenter,
    /// Leave the targets where they are
    Preserve,
}

/// Assets returned by a share redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    /// Base asset paid out
    pub base: Amount,
    /// Quote asset paid out
    pub quote: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_empty_sentinel() {
        assert!(AccountId::new("").is_empty());
        assert!(!AccountId::new("lp-1").is_empty());
    }

    #[test]
    fn test_asset_codes() {
        assert_eq!(Asset::Base.code(), "base");
        assert_eq!(Asset::Quote.to_string(), "quote");
    }

    #[test]
    fn test_one_is_18_decimals() {
        assert_eq!(ONE, 10u128.pow(18));
    }
}
