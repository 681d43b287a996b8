//! Authentication route handlers
//!
//! - Registration and email verification
//! - Sign-in
//! - Profile of the authenticated user
//! - Logout

pub mod logout;
pub mod profile;
pub mod signin;
pub mod signup;
pub mod verify;

use std::sync::Arc;

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{
    AuthService, AuthorizationGate, CacheClient, PasswordHasher, RegistrationWorkflow,
    SessionRevocationStore, VerificationDispatcher,
};

/// Application state that holds shared services
pub struct AppState<M, U, H, D, C>
where
    M: TransactionManager,
    U: UserRepository<Tx = M::Tx>,
    H: PasswordHasher,
    D: VerificationDispatcher,
    C: CacheClient,
{
    pub registration: Arc<RegistrationWorkflow<M, U, H, D>>,
    pub auth_service: Arc<AuthService<U, H>>,
    pub gate: Arc<AuthorizationGate<C>>,
    pub revocations: Arc<SessionRevocationStore<C>>,
    /// Transaction manager over the user store, pinged by `/health`
    pub database: Arc<M>,
}
