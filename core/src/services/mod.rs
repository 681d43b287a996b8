//! Business services containing domain logic and use cases.

pub mod auth;
pub mod dispatch;
pub mod gate;
pub mod password;
pub mod registration;
pub mod revocation;
pub mod token;
pub mod transaction;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use auth::AuthService;
pub use dispatch::{RecordingDispatcher, VerificationDispatcher};
pub use gate::{extract_bearer, AuthorizationGate};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use registration::RegistrationWorkflow;
pub use revocation::{remaining_ttl, CacheClient, MockCacheClient, SessionRevocationStore};
pub use token::{TokenManager, TokenManagerConfig};
pub use transaction::{TransactionCoordinator, UnitOfWork};
