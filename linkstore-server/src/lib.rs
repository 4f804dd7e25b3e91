//! linkstore-server: labeled JSON links over HTTP
//!
//! A single endpoint stores, reads, updates and deletes rows of the `link`
//! table. Payloads are kept as opaque serialised JSON.

pub mod db;
pub mod http;
pub mod models;

pub use db::{ConnectionPool, DbError, LinkStore, PgLinkStore, PoolSettings};
pub use http::{run_server, LinkHandlerConfig, ServerConfig};
pub use models::IdStrategy;
