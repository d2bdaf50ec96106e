//! HTTP server command

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cityctl_server::db::bootstrap;
use cityctl_server::http::server::DEFAULT_REQUEST_TIMEOUT;
use cityctl_server::{run_server, AppState, PgStore, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to listen on
    #[arg(default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(default_value_t = 8111)]
    pub port: u16,

    /// Use a multi-threaded runtime instead of a single thread
    #[arg(long)]
    pub threaded: bool,

    /// Seconds before a request is abandoned
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Skip creating the demo table and tracking index at startup
    #[arg(long)]
    pub skip_bootstrap: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = args.database.pool()?;

    if args.skip_bootstrap {
        tracing::debug!("Bootstrap skipped");
    } else if let Err(e) = bootstrap::run(&pool).await {
        // Pages that do not track still work without the index.
        tracing::warn!(error = %e, "Bootstrap failed; continuing");
    }

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        request_timeout: Duration::from_secs(args.timeout),
    };
    tracing::info!(
        threaded = args.threaded,
        max_connections = args.database.max_connections,
        "Starting cityctl on {}",
        config.bind_addr
    );

    run_server(AppState::new(PgStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
