//! Hand-off of verification tokens to the outside world

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::DomainError;

/// Delivers a freshly issued verification token to its owner
///
/// Called inside the registration transaction; an error aborts the
/// registration.
#[async_trait]
pub trait VerificationDispatcher: Send + Sync {
    async fn dispatch(&self, email: &str, token: &str) -> Result<(), DomainError>;
}

/// Dispatcher that records what it was given, for tests
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every dispatch fail
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// `(email, token)` pairs dispatched so far
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Most recent token dispatched for `email`
    pub async fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl VerificationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, email: &str, token: &str) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("verification dispatch failed"));
        }
        self.sent
            .lock()
            .await
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}
