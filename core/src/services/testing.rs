//! Test doubles and builders shared by the service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::DomainError;
use crate::repositories::MockUserRepository;
use crate::services::dispatch::{RecordingDispatcher, VerificationDispatcher};
use crate::services::password::PasswordHasher;
use crate::services::registration::RegistrationWorkflow;
use crate::services::token::{TokenManager, TokenManagerConfig};
use crate::services::transaction::TransactionCoordinator;

pub const TEST_SECRET: &str = "unit-test-secret";

/// Reversible stand-in for bcrypt
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", password))
    }
}

/// Plain hasher that counts its calls
#[derive(Default)]
pub struct CountingHasher {
    pub hashes: AtomicUsize,
    pub verifies: AtomicUsize,
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        PlainHasher.hash(password).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        PlainHasher.verify(password, hash).await
    }
}

/// Hasher that always fails
pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash(&self, _password: &str) -> Result<String, DomainError> {
        Err(DomainError::internal("password hashing failed"))
    }

    async fn verify(&self, _password: &str, _hash: &str) -> Result<bool, DomainError> {
        Err(DomainError::internal("password verification failed"))
    }
}

/// Dispatcher that never finishes within a test's timeout
pub struct StalledDispatcher;

#[async_trait]
impl VerificationDispatcher for StalledDispatcher {
    async fn dispatch(&self, _email: &str, _token: &str) -> Result<(), DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

pub fn token_manager() -> Arc<TokenManager> {
    Arc::new(TokenManager::new(TokenManagerConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry_seconds: 900,
        refresh_token_expiry_seconds: 604800,
    }))
}

pub fn workflow<H, D>(
    repo: &Arc<MockUserRepository>,
    tokens: &Arc<TokenManager>,
    hasher: H,
    dispatcher: Arc<D>,
    timeout: Duration,
) -> RegistrationWorkflow<MockUserRepository, MockUserRepository, H, D>
where
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
{
    RegistrationWorkflow::new(
        TransactionCoordinator::new(repo.clone()),
        repo.clone(),
        tokens.clone(),
        Arc::new(hasher),
        dispatcher,
        timeout,
    )
}

/// Workflow with the plain hasher and a recording dispatcher
pub fn default_workflow(
    repo: &Arc<MockUserRepository>,
    tokens: &Arc<TokenManager>,
    dispatcher: &Arc<RecordingDispatcher>,
) -> RegistrationWorkflow<MockUserRepository, MockUserRepository, PlainHasher, RecordingDispatcher> {
    workflow(repo, tokens, PlainHasher, dispatcher.clone(), Duration::from_secs(5))
}
