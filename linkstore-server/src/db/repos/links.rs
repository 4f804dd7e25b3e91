//! Link repository
//!
//! Single-row CRUD over the `link` table:
//! - insert: UUID generated here, or key assigned by the table sequence
//! - update/delete: no existence check, callers get `rows_affected`
//!
//! `data` is stored as BYTEA and never interpreted at this layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use uuid::Uuid;

use crate::db::{ConnectionPool, DbError};
use crate::models::{IdStrategy, Label, LinkId};

/// Link record from the store
#[derive(Debug, Clone)]
pub struct StoredLink {
    pub id: LinkId,
    pub label: String,
    /// Serialised JSON exactly as it was written
    pub data: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

/// Storage seam for the link endpoint
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Strategy used to mint and parse identifiers.
    fn id_strategy(&self) -> IdStrategy;

    /// Insert a new row and return its identifier.
    async fn insert(&self, label: &Label, data: &[u8]) -> Result<LinkId, DbError>;

    /// Fetch a row by id. Returns `None` if it does not exist.
    async fn fetch(&self, id: &LinkId) -> Result<Option<StoredLink>, DbError>;

    /// Overwrite `data` (and `label` when given), bumping `updated_at`.
    ///
    /// Returns the number of rows touched; zero for an unknown id.
    async fn update(&self, id: &LinkId, label: Option<&Label>, data: &[u8])
        -> Result<u64, DbError>;

    /// Delete a row. Returns the number of rows removed.
    async fn delete(&self, id: &LinkId) -> Result<u64, DbError>;

    /// Acquire a connection and check it is alive.
    async fn ping(&self) -> Result<(), DbError>;
}

/// Postgres-backed link store
#[derive(Debug, Clone)]
pub struct PgLinkStore {
    pool: ConnectionPool,
    strategy: IdStrategy,
}

impl PgLinkStore {
    pub fn new(pool: ConnectionPool, strategy: IdStrategy) -> Self {
        Self { pool, strategy }
    }
}

fn bind_id<'q>(
    query: Query<'q, Postgres, PgArguments>,
    id: &'q LinkId,
) -> Query<'q, Postgres, PgArguments> {
    match id {
        LinkId::Token(token) => query.bind(token.as_str()),
        LinkId::Serial(n) => query.bind(*n),
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    fn id_strategy(&self) -> IdStrategy {
        self.strategy
    }

    async fn insert(&self, label: &Label, data: &[u8]) -> Result<LinkId, DbError> {
        let mut conn = self.pool.acquire().await?;

        match self.strategy {
            IdStrategy::Uuid => {
                let id = Uuid::new_v4().to_string();
                sqlx::query("INSERT INTO link (id, label, data) VALUES ($1, $2, $3)")
                    .bind(id.as_str())
                    .bind(label.as_str())
                    .bind(data)
                    .execute(&mut *conn)
                    .await?;
                Ok(LinkId::Token(id))
            }
            IdStrategy::Sequential => {
                let id: i64 =
                    sqlx::query_scalar("INSERT INTO link (label, data) VALUES ($1, $2) RETURNING id")
                        .bind(label.as_str())
                        .bind(data)
                        .fetch_one(&mut *conn)
                        .await?;
                Ok(LinkId::Serial(id))
            }
        }
    }

    async fn fetch(&self, id: &LinkId) -> Result<Option<StoredLink>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let row = bind_id(
            sqlx::query("SELECT label, data, updated_at FROM link WHERE id = $1"),
            id,
        )
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // A NULL blob reads back as JSON null
        let data: Option<Vec<u8>> = row.try_get("data")?;

        Ok(Some(StoredLink {
            id: id.clone(),
            label: row.try_get("label")?,
            data: data.unwrap_or_else(|| b"null".to_vec()),
            updated_at: row.try_get("updated_at")?,
        }))
    }

    async fn update(
        &self,
        id: &LinkId,
        label: Option<&Label>,
        data: &[u8],
    ) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let query = match label {
            Some(label) => bind_id(
                sqlx::query(
                    "UPDATE link SET label = $1, data = $2, updated_at = NOW() WHERE id = $3",
                )
                .bind(label.as_str())
                .bind(data),
                id,
            ),
            None => bind_id(
                sqlx::query("UPDATE link SET data = $1, updated_at = NOW() WHERE id = $2")
                    .bind(data),
                id,
            ),
        };

        let result = query.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &LinkId) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = bind_id(sqlx::query("DELETE FROM link WHERE id = $1"), id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        ConnectionPool::ping(&mut conn).await
    }
}
