use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use mockraft_core::keys;
use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::user::UserId;

use crate::error::StorageError;
use crate::store::{InterviewStore, Versioned, sort_newest_first};

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryInterviewStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<(UserId, Uuid), (InterviewRecord, u64)>,
    next_version: u64,
}

impl Inner {
    fn bump(&mut self) -> u64 {
        self.next_version += 1;
        self.next_version
    }
}

impl MemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn list(&self, user_id: &UserId) -> Result<Vec<InterviewRecord>, StorageError> {
        let inner = self.inner.lock().await;
        let mut records: Vec<InterviewRecord> = inner
            .records
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|(_, (record, _))| record.clone())
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Versioned<InterviewRecord>, StorageError> {
        let inner = self.inner.lock().await;
        inner
            .records
            .get(&(user_id.clone(), id))
            .map(|(record, version)| Versioned {
                value: record.clone(),
                version: version.to_string(),
            })
            .ok_or_else(|| StorageError::NotFound {
                key: keys::interview(user_id, id),
            })
    }

    async fn insert(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        let slot = (user_id.clone(), record.id);
        if inner.records.contains_key(&slot) {
            return Err(StorageError::PreconditionFailed {
                key: keys::interview(user_id, record.id),
            });
        }
        let version = inner.bump();
        inner.records.insert(slot, (record.clone(), version));
        Ok(())
    }

    async fn replace(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
        expected_version: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.inner.lock().await;
        let slot = (user_id.clone(), record.id);
        let key = || keys::interview(user_id, record.id);

        let current = match inner.records.get(&slot) {
            Some((_, version)) => *version,
            None => return Err(StorageError::NotFound { key: key() }),
        };
        if current.to_string() != expected_version {
            return Err(StorageError::PreconditionFailed { key: key() });
        }

        let version = inner.bump();
        inner.records.insert(slot, (record.clone(), version));
        Ok(version.to_string())
    }
}
