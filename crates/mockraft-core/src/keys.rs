//! Cache and storage key conventions.
//!
//! Pure string functions. These define the canonical names of cache entries
//! and the layout of interview objects in the bucket.

use uuid::Uuid;

use crate::models::user::UserId;

pub fn mock_stats(user_id: &UserId) -> String {
    format!("mock_stats:{user_id}")
}

pub fn interviews(user_id: &UserId) -> String {
    format!("interviews:{user_id}")
}

/// Every cache key derived from a user's interview records.
pub fn user_cache_keys(user_id: &UserId) -> [String; 2] {
    [interviews(user_id), mock_stats(user_id)]
}

pub fn interviews_prefix(user_id: &UserId) -> String {
    format!("users/{user_id}/mock-interviews/")
}

pub fn interview(user_id: &UserId, id: Uuid) -> String {
    format!("users/{user_id}/mock-interviews/{id}.json")
}
