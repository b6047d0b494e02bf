//! In-memory session storage.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockWriteGuard},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use tower_sessions::{
    ExpiredDeletion, SessionStore,
    session::{Id, Record},
    session_store,
};

type Records = HashMap<Id, Record>;

/// In-memory storage implementation.
///
/// The cookie carries only the session id. Useful for development and
/// single-process deployments. Data is lost on restart.
///
/// Expired records are evicted when they are next looked up and on every
/// new session; empty sessions are never kept. Run
/// [`ExpiredDeletion::delete_expired`] periodically to reclaim records of
/// visitors that never come back.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included until evicted.
    ///
    /// # Errors
    /// Returns error if the lock is poisoned.
    pub fn len(&self) -> session_store::Result<usize> {
        Ok(self.write()?.len())
    }

    /// Whether no session is stored.
    ///
    /// # Errors
    /// Returns error if the lock is poisoned.
    pub fn is_empty(&self) -> session_store::Result<bool> {
        Ok(self.len()? == 0)
    }

    fn write(&self) -> session_store::Result<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|e| session_store::Error::Backend(e.to_string()))
    }
}

fn is_live(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc() && !record.data.is_empty()
}

fn evict_expired(records: &mut Records) -> usize {
    let before = records.len();
    let now = OffsetDateTime::now_utc();
    records.retain(|_, record| record.expiry_date > now);
    before - records.len()
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.write()?;
        let evicted = evict_expired(&mut records);
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted expired sessions");
        }

        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        if is_live(record) {
            records.insert(record.id, record.clone());
        }
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut records = self.write()?;
        if is_live(record) {
            records.insert(record.id, record.clone());
        } else {
            records.remove(&record.id);
        }
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let mut records = self.write()?;
        let now = OffsetDateTime::now_utc();
        if records.get(id).is_some_and(|record| record.expiry_date <= now) {
            records.remove(id);
            tracing::debug!(%id, "Evicted expired session");
        }
        Ok(records.get(id).cloned())
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.write()?.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MemoryStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let evicted = evict_expired(&mut *self.write()?);
        tracing::debug!(evicted, "Deleted expired sessions");
        Ok(())
    }
}
