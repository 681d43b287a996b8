//! Adaptive password hashing

use async_trait::async_trait;
use tracing::error;

use crate::errors::DomainError;

/// Lowest cost accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost accepted by bcrypt
pub const MAX_BCRYPT_COST: u32 = 31;

/// Hashes and checks passwords
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// bcrypt with a fixed cost, run on the blocking thread pool
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(DomainError::validation(
                "bcrypt_cost",
                format!("must be {}-{}", MIN_BCRYPT_COST, MAX_BCRYPT_COST),
            ));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "Password hashing failed");
                DomainError::internal("password hashing failed")
            })
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "Password verification failed");
                DomainError::internal("password verification failed")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).unwrap();
        let hash = hasher.hash("s3cret!").await.unwrap();

        assert_ne!(hash, "s3cret!");
        assert!(hasher.verify("s3cret!", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash_is_internal() {
        let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).unwrap();
        let result = hasher.verify("s3cret!", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(BcryptPasswordHasher::new(3).is_err());
        assert!(BcryptPasswordHasher::new(32).is_err());
        assert_eq!(BcryptPasswordHasher::new(10).unwrap().cost(), 10);
        assert_eq!(BcryptPasswordHasher::default().cost(), 12);
    }
}
