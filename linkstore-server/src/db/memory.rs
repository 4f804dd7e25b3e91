//! In-memory link store for router tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DbError, LinkStore, StoredLink};
use crate::models::{IdStrategy, Label, LinkId};

/// Map-backed store with the same semantics as the Postgres one
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    strategy: IdStrategy,
    rows: RwLock<HashMap<LinkId, StoredLink>>,
    next_serial: AtomicI64,
    unavailable: AtomicBool,
    delay_ms: AtomicU64,
}

impl MemoryLinkStore {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Make every subsequent call fail as if the pool were exhausted.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Sleep this long before every call, like a slow database.
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Store raw bytes under `id`, bypassing serialisation.
    pub async fn put_raw(&self, id: LinkId, label: &str, data: &[u8]) {
        let link = StoredLink {
            id: id.clone(),
            label: label.to_owned(),
            data: data.to_vec(),
            updated_at: Utc::now(),
        };
        self.rows.write().await.insert(id, link);
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn check(&self) -> Result<(), DbError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    fn id_strategy(&self) -> IdStrategy {
        self.strategy
    }

    async fn insert(&self, label: &Label, data: &[u8]) -> Result<LinkId, DbError> {
        self.check().await?;

        let id = match self.strategy {
            IdStrategy::Uuid => LinkId::Token(Uuid::new_v4().to_string()),
            IdStrategy::Sequential => {
                LinkId::Serial(self.next_serial.fetch_add(1, Ordering::SeqCst) + 1)
            }
        };
        self.put_raw(id.clone(), label.as_str(), data).await;
        Ok(id)
    }

    async fn fetch(&self, id: &LinkId) -> Result<Option<StoredLink>, DbError> {
        self.check().await?;
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &LinkId,
        label: Option<&Label>,
        data: &[u8],
    ) -> Result<u64, DbError> {
        self.check().await?;

        let mut rows = self.rows.write().await;
        let Some(link) = rows.get_mut(id) else {
            return Ok(0);
        };

        if let Some(label) = label {
            link.label = label.as_str().to_owned();
        }
        link.data = data.to_vec();
        link.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, id: &LinkId) -> Result<u64, DbError> {
        self.check().await?;
        Ok(self.rows.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_refreshes_updated_at() {
        let store = MemoryLinkStore::new(IdStrategy::Sequential);
        let label = Label::new("home").unwrap();
        let id = store.insert(&label, b"1").await.unwrap();
        let before = store.fetch(&id).await.unwrap().unwrap().updated_at;

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.update(&id, None, b"2").await.unwrap(), 1);

        let after = store.fetch(&id).await.unwrap().unwrap();
        assert!(after.updated_at > before);
        assert_eq!(after.data, b"2");
        assert_eq!(after.label, "home");
    }

    #[tokio::test(start_paused = true)]
    async fn delay_holds_every_call() {
        let store = MemoryLinkStore::new(IdStrategy::Uuid);
        store.set_delay(Duration::from_secs(5));

        let started = tokio::time::Instant::now();
        store.ping().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
