//! Command implementations for the cityctl CLI

pub mod bootstrap;
pub mod serve;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use cityctl_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use cityctl_server::db::PgPool;
use cityctl_server::{create_pool, PoolSettings};

pub use bootstrap::run_bootstrap;
pub use serve::run_serve;

/// Connection options shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before giving up
    #[arg(long, default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub acquire_timeout: u64,
}

impl DatabaseArgs {
    /// Build the (lazily connecting) pool.
    pub fn pool(&self) -> Result<PgPool> {
        let settings = PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
        };
        create_pool(&self.database_url, settings).context("Invalid DATABASE_URL")
    }
}
