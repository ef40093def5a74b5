//! Configuration for a pool instance

use serde::{Deserialize, Serialize};

/// Pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Pool name (used in logs and metrics labels)
    pub name: String,

    /// Display symbol of the base asset
    pub base_symbol: String,

    /// Display symbol of the quote asset
    pub quote_symbol: String,

    /// Actor mailbox depth (bounded channel for backpressure)
    pub mailbox_depth: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "pool-core".to_string(),
            base_symbol: "BASE".to_string(),
            quote_symbol: "QUOTE".to_string(),
            mailbox_depth: 64,
        }
    }
}

impl PoolConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: PoolConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load defaults with environment variable overrides
    pub fn from_env() -> crate::Result<Self> {
        let mut config = PoolConfig::default();

        if let Ok(name) = std::env::var("POOL_NAME") {
            config.name = name;
        }

        if let Ok(symbol) = std::env::var("POOL_BASE_SYMBOL") {
            config.base_symbol = symbol;
        }

        if let Ok(symbol) = std::env::var("POOL_QUOTE_SYMBOL") {
            config.quote_symbol = symbol;
        }

        if let Ok(depth) = std::env::var("POOL_MAILBOX_DEPTH") {
            config.mailbox_depth = depth
                .parse()
                .map_err(|e| crate::Error::Config(format!("Bad POOL_MAILBOX_DEPTH: {}", e)))?;
        }

        Ok(config)
    }
}
