//! # Infrastructure Layer
//!
//! Concrete adapters for the UserAuth core:
//! - **Database**: MySQL user repository and transaction manager using SQLx
//! - **Cache**: Redis client backing the session revocation store
//! - **Notify**: verification-link delivery

use ua_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and operations
pub mod cache;

/// Verification delivery
pub mod notify;

pub use cache::RedisClient;
pub use database::{DatabasePool, MySqlTransactionManager, MySqlUserRepository};
pub use notify::LogVerificationDispatcher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
