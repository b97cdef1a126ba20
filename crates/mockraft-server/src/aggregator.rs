//! Cache-aside read paths over a user's interview records.
//!
//! Reads check the cache first and fall back to the store on a miss, then
//! populate the cache. Writes elsewhere call [`StatsAggregator::invalidate`]
//! so the next read recomputes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mockraft_cache::Cache;
use mockraft_cache::error::CacheError;
use mockraft_core::keys;
use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::stats::StatsSummary;
use mockraft_core::models::user::UserId;
use mockraft_core::stats::compute_stats;
use mockraft_storage::error::StorageError;
use mockraft_storage::store::InterviewStore;

#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("store error: {0}")]
    Storage(#[from] StorageError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("cached value for {key} is unreadable: {source}")]
    CorruptEntry {
        key: String,
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where a response's data was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    /// The document store. The wire name predates the current backend.
    #[serde(rename = "firestore")]
    Store,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sourced<T> {
    pub source: Source,
    pub data: T,
}

#[derive(Clone)]
pub struct StatsAggregator {
    store: Arc<dyn InterviewStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn InterviewStore>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// The user's statistics summary, computed on a cache miss.
    pub async fn mock_stats(&self, user_id: &UserId) -> Result<StatsSummary, AggregatorError> {
        let key = keys::mock_stats(user_id);
        let stats = self
            .read_through(&key, || async move {
                let records = self.store.list(user_id).await?;
                Ok::<_, AggregatorError>(compute_stats(&records, jiff::Timestamp::now()))
            })
            .await?;
        Ok(stats.data)
    }

    /// All of the user's records, newest first, tagged with where they came from.
    pub async fn all_interviews(
        &self,
        user_id: &UserId,
    ) -> Result<Sourced<Vec<InterviewRecord>>, AggregatorError> {
        let key = keys::interviews(user_id);
        self.read_through(&key, || async move {
            Ok::<_, AggregatorError>(self.store.list(user_id).await?)
        })
        .await
    }

    /// Drop every cached view of the user's records.
    ///
    /// Failure is logged, not returned: the write that triggered it has
    /// already succeeded, and the TTL bounds how long a stale entry survives.
    pub async fn invalidate(&self, user_id: &UserId) {
        let cache_keys = keys::user_cache_keys(user_id);
        match self.cache.delete(&cache_keys).await {
            Ok(removed) => tracing::debug!(user_id = %user_id, removed, "cache invalidated"),
            Err(e) => tracing::warn!(
                user_id = %user_id,
                error = %e,
                "cache invalidation failed; entries expire with ttl"
            ),
        }
    }

    async fn read_through<T, F, Fut>(
        &self,
        key: &str,
        load: F,
    ) -> Result<Sourced<T>, AggregatorError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AggregatorError>>,
    {
        if let Some(cached) = self.cache.get(key).await? {
            tracing::debug!(key, "cache hit");
            let data = serde_json::from_str(&cached).map_err(|source| {
                AggregatorError::CorruptEntry {
                    key: key.to_string(),
                    source,
                }
            })?;
            return Ok(Sourced {
                source: Source::Cache,
                data,
            });
        }

        tracing::debug!(key, "cache miss");
        let data = load().await?;
        let serialized = serde_json::to_string(&data)?;
        self.cache.set(key, &serialized, self.ttl).await?;

        Ok(Sourced {
            source: Source::Store,
            data,
        })
    }
}
