//! In-memory CacheClient with expiring entries

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::errors::DomainError;

use super::traits::CacheClient;

/// Mock cache for testing
///
/// Expiry follows `tokio::time`, so paused-clock tests can advance past a TTL.
#[derive(Clone, Default)]
pub struct MockCacheClient {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
    fail: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    sets: Arc<AtomicUsize>,
}

impl MockCacheClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with an internal error
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `get` calls made so far
    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls made so far
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Remaining lifetime of a live entry
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .and_then(|(_, expires_at)| expires_at.checked_duration_since(Instant::now()))
            .filter(|left| !left.is_zero())
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock cache unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheClient for MockCacheClient {
    async fn ping(&self) -> Result<(), DomainError> {
        self.check_fail()
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;

        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;

        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }
}
