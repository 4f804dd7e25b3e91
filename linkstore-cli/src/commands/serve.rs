//! HTTP server command
//!
//! Connects the pool and serves the link endpoint until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use linkstore_server::{run_server, IdStrategy, LinkHandlerConfig, PgLinkStore, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// How link ids are produced: uuid or sequential
    #[arg(long, env = "ID_STRATEGY", default_value = "uuid")]
    pub id_strategy: IdStrategy,

    /// Disable cross-origin headers and OPTIONS handling
    #[arg(long)]
    pub no_cors: bool,

    /// Reject updates that do not carry a label
    #[arg(long)]
    pub require_label_on_update: bool,

    /// Abort requests that run longer than this many seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting linkstore server on {}", args.bind);

    let pool = args.database.connect().await?;
    let store = Arc::new(PgLinkStore::new(pool.clone(), args.id_strategy));

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        links: LinkHandlerConfig {
            cors: !args.no_cors,
            require_label_on_update: args.require_label_on_update,
        },
    };

    // Blocks until shutdown
    let result = run_server(store, config).await.context("Server error");
    pool.close().await;
    result
}
