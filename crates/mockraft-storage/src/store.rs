use async_trait::async_trait;
use uuid::Uuid;

use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::user::UserId;

use crate::error::StorageError;

/// A value together with the version tag it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub value: T,
    pub version: String,
}

/// Per-user collection of interview records.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// All of the user's records, newest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<InterviewRecord>, StorageError>;

    async fn get(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Versioned<InterviewRecord>, StorageError>;

    /// Store a new record. Fails with `PreconditionFailed` if the id is taken.
    async fn insert(&self, user_id: &UserId, record: &InterviewRecord)
    -> Result<(), StorageError>;

    /// Overwrite a record only if it is still at `expected_version`.
    /// Returns the new version.
    async fn replace(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
        expected_version: &str,
    ) -> Result<String, StorageError>;

    /// Add `delta` to the record's points and return the new total.
    async fn increment_points(
        &self,
        user_id: &UserId,
        id: Uuid,
        delta: u32,
    ) -> Result<u32, StorageError> {
        let Versioned {
            value: mut record,
            version,
        } = self.get(user_id, id).await?;

        let points = record
            .points
            .unwrap_or(0)
            .checked_add(delta)
            .ok_or(StorageError::PointsOverflow { id })?;
        record.points = Some(points);

        self.replace(user_id, &record, &version).await?;
        Ok(points)
    }
}

/// Newest first; ties fall back to id so listings are stable.
pub(crate) fn sort_newest_first(records: &mut [InterviewRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
