//! Trait for the shared cache collaborator

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key/value cache with per-key expiry
///
/// Each operation is atomic per key; callers hold no locks. Failures are
/// reported as `DomainError::Internal` and are never retried silently.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Check that the cache is reachable
    async fn ping(&self) -> Result<(), DomainError>;
    /// Store `value` under `key`, expiring after `ttl_seconds`
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;
    /// Read `key`, `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
}
