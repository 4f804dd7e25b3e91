//! Database layer - connection pool and link repository
//!
//! # Design Principles
//!
//! - One pooled connection per store call, released on drop
//! - One statement per call, no check-then-write
//! - Payloads cross this boundary as raw bytes

pub mod error;
#[cfg(test)]
pub mod memory;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{ConnectionPool, PoolSettings};
pub use repos::*;
