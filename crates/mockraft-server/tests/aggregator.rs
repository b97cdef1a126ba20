use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use uuid::Uuid;

use mockraft_cache::Cache;
use mockraft_cache::memory::MemoryCache;
use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::user::UserId;
use mockraft_server::aggregator::{AggregatorError, Source, StatsAggregator};
use mockraft_storage::memory::MemoryInterviewStore;
use mockraft_storage::store::InterviewStore;

const TTL: Duration = Duration::from_secs(3600);

struct Fixture {
    store: Arc<MemoryInterviewStore>,
    cache: Arc<MemoryCache>,
    aggregator: StatsAggregator,
    user: UserId,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryInterviewStore::new());
    let cache = Arc::new(MemoryCache::new());
    let aggregator = StatsAggregator::new(store.clone(), cache.clone(), TTL);
    Fixture {
        store,
        cache,
        aggregator,
        user: UserId::parse("user_1").unwrap(),
    }
}

fn record(points: u32) -> InterviewRecord {
    InterviewRecord {
        id: Uuid::new_v4(),
        role: "Platform Engineer".to_string(),
        created_at: Timestamp::now(),
        questions: Vec::new(),
        overall_score: Some(60.0),
        feedback: None,
        completed: true,
        points: Some(points),
    }
}

#[tokio::test]
async fn hit_serves_cached_summary_until_invalidated() {
    let f = fixture();
    f.store.insert(&f.user, &record(5)).await.unwrap();

    let first = f.aggregator.mock_stats(&f.user).await.unwrap();
    assert_eq!(first.total, 1);

    // A write that bypasses invalidation is not visible yet.
    f.store.insert(&f.user, &record(7)).await.unwrap();
    let cached = f.aggregator.mock_stats(&f.user).await.unwrap();
    assert_eq!(cached, first);

    f.aggregator.invalidate(&f.user).await;
    let fresh = f.aggregator.mock_stats(&f.user).await.unwrap();
    assert_eq!(fresh.total, 2);
    assert_eq!(fresh.total_points, 12);
}

#[tokio::test]
async fn cached_summary_is_byte_identical_to_computed() {
    let f = fixture();
    f.store.insert(&f.user, &record(3)).await.unwrap();

    let computed = f.aggregator.mock_stats(&f.user).await.unwrap();
    let stored = f.cache.get("mock_stats:user_1").await.unwrap().unwrap();
    assert_eq!(serde_json::to_string(&computed).unwrap(), stored);

    let hit = f.aggregator.mock_stats(&f.user).await.unwrap();
    assert_eq!(serde_json::to_string(&hit).unwrap(), stored);
}

#[tokio::test(start_paused = true)]
async fn summary_is_recomputed_after_ttl() {
    let f = fixture();
    f.store.insert(&f.user, &record(1)).await.unwrap();
    f.aggregator.mock_stats(&f.user).await.unwrap();

    f.store.insert(&f.user, &record(1)).await.unwrap();
    tokio::time::advance(TTL).await;

    assert_eq!(f.aggregator.mock_stats(&f.user).await.unwrap().total, 2);
}

#[tokio::test]
async fn listing_switches_source_after_first_read() {
    let f = fixture();
    f.store.insert(&f.user, &record(0)).await.unwrap();

    let first = f.aggregator.all_interviews(&f.user).await.unwrap();
    assert_eq!(first.source, Source::Store);
    let second = f.aggregator.all_interviews(&f.user).await.unwrap();
    assert_eq!(second.source, Source::Cache);
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn invalidate_clears_both_keys() {
    let f = fixture();
    f.aggregator.mock_stats(&f.user).await.unwrap();
    f.aggregator.all_interviews(&f.user).await.unwrap();
    assert_eq!(f.cache.len().await, 2);

    f.aggregator.invalidate(&f.user).await;
    assert!(f.cache.is_empty().await);
}

#[tokio::test]
async fn corrupt_cache_entry_is_an_error() {
    let f = fixture();
    f.cache
        .set("mock_stats:user_1", "not json", TTL)
        .await
        .unwrap();

    let err = f.aggregator.mock_stats(&f.user).await.unwrap_err();
    assert!(matches!(err, AggregatorError::CorruptEntry { .. }));
}

#[tokio::test]
async fn users_do_not_share_cache_entries() {
    let f = fixture();
    let other = UserId::parse("user_2").unwrap();
    f.store.insert(&f.user, &record(4)).await.unwrap();

    assert_eq!(f.aggregator.mock_stats(&f.user).await.unwrap().total, 1);
    assert_eq!(f.aggregator.mock_stats(&other).await.unwrap().total, 0);
}
