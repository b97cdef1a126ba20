use async_trait::async_trait;
use aws_sdk_s3::Client;
use uuid::Uuid;

use mockraft_core::keys;
use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::user::UserId;

use crate::error::StorageError;
use crate::objects::{self, WriteCondition};
use crate::store::{InterviewStore, Versioned, sort_newest_first};

/// Interview records as JSON objects under `users/{userId}/mock-interviews/`.
#[derive(Clone)]
pub struct S3InterviewStore {
    client: Client,
    bucket: String,
}

impl S3InterviewStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl InterviewStore for S3InterviewStore {
    async fn list(&self, user_id: &UserId) -> Result<Vec<InterviewRecord>, StorageError> {
        let prefix = keys::interviews_prefix(user_id);
        let object_keys = objects::list_objects(&self.client, &self.bucket, &prefix).await?;

        let mut records = Vec::with_capacity(object_keys.len());
        for key in object_keys.iter().filter(|k| k.ends_with(".json")) {
            let output = objects::get_object(&self.client, &self.bucket, key).await?;
            records.push(serde_json::from_slice::<InterviewRecord>(&output.body)?);
        }

        sort_newest_first(&mut records);
        tracing::debug!(user_id = %user_id, count = records.len(), "listed interviews");
        Ok(records)
    }

    async fn get(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Versioned<InterviewRecord>, StorageError> {
        let key = keys::interview(user_id, id);
        let output = objects::get_object(&self.client, &self.bucket, &key).await?;
        let value = serde_json::from_slice(&output.body)?;
        let version = objects::require_etag(&key, output.etag)?;
        Ok(Versioned { value, version })
    }

    async fn insert(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
    ) -> Result<(), StorageError> {
        let key = keys::interview(user_id, record.id);
        let body = serde_json::to_vec(record)?;
        objects::put_json(
            &self.client,
            &self.bucket,
            &key,
            body,
            WriteCondition::IfAbsent,
        )
        .await?;
        Ok(())
    }

    async fn replace(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
        expected_version: &str,
    ) -> Result<String, StorageError> {
        let key = keys::interview(user_id, record.id);
        let expected_version = objects::require_etag(&key, Some(expected_version.to_string()))?;
        let body = serde_json::to_vec(record)?;
        let etag = objects::put_json(
            &self.client,
            &self.bucket,
            &key,
            body,
            WriteCondition::IfMatch(&expected_version),
        )
        .await?;
        objects::require_etag(&key, etag)
    }
}
