//! cityctl CLI - runs the complaint search web app
//!
//! - `serve`: bootstrap the schema additions, then serve HTTP until shutdown
//! - `bootstrap`: create the demo table and tracking index, then exit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "cityctl",
    author,
    version,
    about = "Browse city service complaints by neighborhood, agency and type"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the demo table and tracking index, then exit
    Bootstrap(commands::bootstrap::BootstrapArgs),
}

fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let threaded = matches!(&cli.command, Commands::Serve(args) if args.threaded);
    let runtime = if threaded {
        tokio::runtime::Builder::new_multi_thread()
    } else {
        tokio::runtime::Builder::new_current_thread()
    }
    .enable_all()
    .build()
    .context("Failed to start async runtime")?;

    runtime.block_on(async {
        match cli.command {
            Commands::Serve(args) => commands::run_serve(args).await,
            Commands::Bootstrap(args) => commands::run_bootstrap(args).await,
        }
    })
}
