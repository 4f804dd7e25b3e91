//! Database error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The pool could not hand out a live connection
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed on an acquired connection
    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),
}
