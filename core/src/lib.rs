//! # UserAuth Core
//!
//! Core business logic and domain layer for the UserAuth backend.
//! This crate contains domain entities, business services, repository and
//! cache interfaces, in-memory test doubles, and the error taxonomy that the
//! infrastructure and API layers build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessClaims, NewUser, RefreshClaims, TokenClaims, TokenPair, User, UserStatus,
    VerificationClaims,
};
pub use domain::value_objects::{CreateUserRequest, Principal, SignInRequest, UserProfile};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{MockUserRepository, TransactionManager, UserRepository};
pub use services::{
    AuthService, AuthorizationGate, BcryptPasswordHasher, CacheClient, MockCacheClient,
    PasswordHasher, RecordingDispatcher, RegistrationWorkflow, SessionRevocationStore,
    TokenManager, TokenManagerConfig, TransactionCoordinator, VerificationDispatcher,
};
