//! Key-value persistence port
//!
//! Small durable store behind the session/profile directory, the active
//! session marker and the work timer. Values are opaque strings (the
//! callers serialize JSON into them), so the same logic can target memory,
//! a file tree or a real database.

use async_trait::async_trait;

use crate::domain::DomainResult;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    async fn remove(&self, key: &str) -> DomainResult<()>;
}
