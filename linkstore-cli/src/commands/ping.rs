//! One-shot connectivity check

use anyhow::{Context, Result};
use clap::Parser;

use linkstore_server::ConnectionPool;

use super::DatabaseArgs;

/// Arguments for the ping command
#[derive(Parser, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Connect, ping once, and report
pub async fn run_ping(args: PingArgs) -> Result<()> {
    let pool = args.database.connect().await?;

    {
        let mut conn = pool.acquire().await.context("Failed to acquire a connection")?;
        ConnectionPool::ping(&mut conn).await.context("Ping failed")?;
    }
    pool.close().await;

    println!("Connected!");
    Ok(())
}
