//! linkstore CLI - serve and check the link store
//!
//! Subcommands:
//! - `serve`: run the HTTP endpoint
//! - `ping`: check that the configured store is reachable

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::{ping::PingArgs, serve::ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "linkstore",
    author,
    version,
    about = "Store and fetch labeled JSON links over HTTP"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Check connectivity to the store
    Ping(PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; DSN may come from the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Ping(args) => commands::run_ping(args).await?,
    }

    Ok(())
}
