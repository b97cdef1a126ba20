#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use mockraft_cache::Cache;
use mockraft_cache::error::CacheError;
use mockraft_cache::memory::MemoryCache;
use mockraft_server::config::Config;
use mockraft_server::router;
use mockraft_server::state::AppState;
use mockraft_core::models::interview::InterviewRecord;
use mockraft_core::models::user::UserId;
use mockraft_storage::error::StorageError;
use mockraft_storage::memory::MemoryInterviewStore;
use mockraft_storage::store::{InterviewStore, Versioned};
use uuid::Uuid;

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryInterviewStore>,
}

pub fn app_with_cache(cache: Arc<dyn Cache>) -> TestApp {
    let store = Arc::new(MemoryInterviewStore::new());
    let state = AppState::new(store.clone(), cache, &Config::in_memory());
    TestApp {
        app: router(state),
        store,
    }
}

/// App whose every versioned replace loses to a concurrent writer.
pub fn app_with_racing_writer() -> TestApp {
    let store = Arc::new(MemoryInterviewStore::new());
    let racing = Arc::new(RacingStore {
        inner: store.clone(),
    });
    let state = AppState::new(racing, Arc::new(MemoryCache::new()), &Config::in_memory());
    TestApp {
        app: router(state),
        store,
    }
}

pub fn app() -> (TestApp, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());
    (app_with_cache(cache.clone()), cache)
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> serde_json::Value {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let (status, body) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).unwrap()
    }

    /// Create an interview and return its id.
    pub async fn create_interview(&self, user_id: &str, questions: serde_json::Value) -> String {
        let body = self
            .post_json(
                "/mock-interview/create-mock-interview",
                serde_json::json!({
                    "userId": user_id,
                    "role": "Backend Engineer",
                    "questions": questions,
                }),
            )
            .await;
        assert_eq!(body["status"], "success");
        body["docId"].as_str().unwrap().to_string()
    }
}

/// Cache whose operations can be told to fail.
#[derive(Default)]
pub struct FlakyCache {
    pub inner: MemoryCache,
    pub fail_get: bool,
    pub fail_delete: bool,
    pub deletes: AtomicUsize,
}

// Any variant serves; the server only sees "the cache failed".
fn refused() -> CacheError {
    CacheError::InvalidTtl(Duration::ZERO)
}

#[async_trait]
impl Cache for FlakyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if self.fail_get {
            return Err(refused());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, keys: &[String]) -> Result<usize, CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(refused());
        }
        self.inner.delete(keys).await
    }
}

pub struct RacingStore {
    inner: Arc<MemoryInterviewStore>,
}

#[async_trait]
impl InterviewStore for RacingStore {
    async fn list(&self, user_id: &UserId) -> Result<Vec<InterviewRecord>, StorageError> {
        self.inner.list(user_id).await
    }

    async fn get(
        &self,
        user_id: &UserId,
        id: Uuid,
    ) -> Result<Versioned<InterviewRecord>, StorageError> {
        self.inner.get(user_id, id).await
    }

    async fn insert(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
    ) -> Result<(), StorageError> {
        self.inner.insert(user_id, record).await
    }

    async fn replace(
        &self,
        user_id: &UserId,
        record: &InterviewRecord,
        _expected_version: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::PreconditionFailed {
            key: mockraft_core::keys::interview(user_id, record.id),
        })
    }
}
