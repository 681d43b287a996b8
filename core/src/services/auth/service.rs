//! Main authentication service implementation

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use ua_shared::validation::validators;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{SignInRequest, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenManager;

/// Password checked against when the email is unknown
const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

/// Authentication service for sign-in and account lookups
pub struct AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token manager for issuing the sign-in token pair
    token_manager: Arc<TokenManager>,
    /// Password hasher matching the one used at registration
    hasher: Arc<H>,
    /// Hash verified on the unknown-email path, built on first use
    dummy_hash: OnceCell<String>,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(user_repository: Arc<U>, token_manager: Arc<TokenManager>, hasher: Arc<H>) -> Self {
        Self {
            user_repository,
            token_manager,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Check credentials and issue an access/refresh token pair
    ///
    /// Unknown emails and wrong passwords fail with the same error. Only
    /// after the password matches is the account's verification state
    /// revealed. An unknown email still pays for one hash verification so
    /// both failures take the same time.
    pub async fn sign_in(&self, request: SignInRequest) -> DomainResult<TokenPair> {
        let email = request.email.trim();
        if !validators::not_empty(email) {
            return Err(DomainError::validation("email", "email is required"));
        }
        if !validators::not_empty(&request.password) {
            return Err(DomainError::validation("password", "password is required"));
        }

        let user = match self.user_repository.get_by_email(None, email).await? {
            Some(user) => user,
            None => {
                let dummy = self
                    .dummy_hash
                    .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
                    .await?;
                self.hasher.verify(&request.password, dummy).await?;
                warn!("Sign-in rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(&request.password, &user.password_hash).await? {
            warn!(user_id = user.id, "Sign-in rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active() {
            warn!(user_id = user.id, "Sign-in rejected: email not verified");
            return Err(AuthError::EmailNotVerified.into());
        }

        let pair = self.token_manager.issue_token_pair(user.id, &user.email)?;
        info!(user_id = user.id, "User signed in");
        Ok(pair)
    }

    /// Profile of the user behind an authenticated request
    pub async fn profile(&self, user_id: i64) -> DomainResult<UserProfile> {
        self.get_by_id(user_id).await.map(UserProfile::from)
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .get_by_email(None, email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<User> {
        self.user_repository
            .get_by_id(None, id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }
}
