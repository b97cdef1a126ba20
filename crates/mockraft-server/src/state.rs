use std::sync::Arc;

use mockraft_cache::Cache;
use mockraft_cache::memory::MemoryCache;
use mockraft_cache::redis_cache::RedisCache;
use mockraft_storage::memory::MemoryInterviewStore;
use mockraft_storage::s3::S3InterviewStore;
use mockraft_storage::store::InterviewStore;

use crate::aggregator::StatsAggregator;
use crate::config::{CacheBackend, Config, StoreBackend};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InterviewStore>,
    pub aggregator: StatsAggregator,
}

impl AppState {
    /// Wire explicit store and cache handles together.
    pub fn new(store: Arc<dyn InterviewStore>, cache: Arc<dyn Cache>, config: &Config) -> Self {
        let aggregator = StatsAggregator::new(store.clone(), cache, config.cache_ttl);
        Self { store, aggregator }
    }

    /// Connect to the backends named in `config`.
    pub async fn connect(config: &Config) -> eyre::Result<Self> {
        let store: Arc<dyn InterviewStore> = match &config.store {
            StoreBackend::S3 { bucket } => {
                let s3 = mockraft_storage::client::build_client().await;
                tracing::info!(bucket = %bucket, "using S3 interview store");
                Arc::new(S3InterviewStore::new(s3, bucket.clone()))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory interview store; data is lost on restart");
                Arc::new(MemoryInterviewStore::new())
            }
        };

        let cache: Arc<dyn Cache> = match &config.cache {
            CacheBackend::Redis { url } => Arc::new(RedisCache::connect(url).await?),
            CacheBackend::Memory => {
                tracing::info!("using in-memory cache");
                Arc::new(MemoryCache::new())
            }
        };

        Ok(Self::new(store, cache, config))
    }
}
