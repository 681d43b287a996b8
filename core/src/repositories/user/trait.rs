//! User repository trait defining the interface for user data persistence.
//!
//! Every operation takes an optional transaction handle. `Some(tx)` runs the
//! statement inside that unit of work; `None` runs it on the ambient pool.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Transaction handle accepted by every operation
    type Tx: Send + 'static;

    /// Insert a new user and return it with the generated id
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Conflict)` - The email is already taken
    /// * `Err(DomainError::Internal)` - Storage failure
    async fn create(&self, tx: Option<&mut Self::Tx>, user: NewUser) -> Result<User, DomainError>;

    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn get_by_email(
        &self,
        tx: Option<&mut Self::Tx>,
        email: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by identifier
    async fn get_by_id(&self, tx: Option<&mut Self::Tx>, id: i64)
        -> Result<Option<User>, DomainError>;

    /// Move a `pending` user with this email to `active`
    ///
    /// # Returns
    /// * `Ok(())` - Exactly one user was activated
    /// * `Err(DomainError::NotFound)` - No pending user has this email, either
    ///   because the email is unknown or the user is already active
    async fn activate_by_email(
        &self,
        tx: Option<&mut Self::Tx>,
        email: &str,
    ) -> Result<(), DomainError>;
}
