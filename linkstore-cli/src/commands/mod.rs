//! Command implementations for the linkstore CLI

pub mod ping;
pub mod serve;

pub use ping::run_ping;
pub use serve::run_serve;

use anyhow::{Context, Result};
use clap::Args;
use std::time::Duration;

use linkstore_server::{ConnectionPool, PoolSettings};

/// Connection options shared by every command that talks to the store
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Connection string for the link store
    #[arg(long, env = "DSN", hide_env_values = true)]
    pub dsn: Option<String>,

    /// Maximum open connections
    #[arg(long, default_value_t = 10)]
    pub max_connections: u32,

    /// Connections kept open while idle
    #[arg(long, default_value_t = 0)]
    pub min_connections: u32,

    /// Maximum connection lifetime in seconds
    #[arg(long, default_value_t = 60)]
    pub max_lifetime_secs: u64,

    /// Idle connection timeout in seconds
    #[arg(long, default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Seconds to wait for a free connection
    #[arg(long, default_value_t = 30)]
    pub acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            max_lifetime: Duration::from_secs(self.max_lifetime_secs),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    /// Open the pool, failing with a readable error when the DSN is missing
    /// or unusable.
    pub async fn connect(&self) -> Result<ConnectionPool> {
        let dsn = self
            .dsn
            .as_deref()
            .filter(|dsn| !dsn.is_empty())
            .context("DSN not set. Set via --dsn, the DSN env var, or a .env file")?;

        ConnectionPool::connect(dsn, &self.pool_settings())
            .await
            .context("Failed to connect to the link store")
    }
}
