//! mockraft-cache
//!
//! String key-value cache with per-entry expiry. Redis in production, a
//! process-local map in development and tests.

pub mod error;
pub mod memory;
pub mod redis_cache;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove `keys`. Returns how many existed.
    async fn delete(&self, keys: &[String]) -> Result<usize, CacheError>;
}
