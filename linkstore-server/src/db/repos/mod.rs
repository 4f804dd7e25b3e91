//! Repository implementations for database access

pub mod links;

pub use links::{LinkStore, PgLinkStore, StoredLink};
