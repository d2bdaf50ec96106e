//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use cityctl_server::db::bootstrap;

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create the demo table and tracking index, then exit
pub async fn run_bootstrap(args: BootstrapArgs) -> Result<()> {
    let pool = args.database.pool()?;

    let report = bootstrap::run(&pool).await.context("Bootstrap failed")?;
    if report.seeded_demo_names {
        println!("Demo table seeded with {} names", bootstrap::DEMO_NAMES.len());
    }
    println!("Bootstrap complete");

    pool.close().await;
    Ok(())
}
