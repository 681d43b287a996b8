//! Main registration workflow implementation

use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use ua_shared::validation::validators;

use crate::domain::entities::token::VerificationClaims;
use crate::domain::entities::user::{NewUser, User};
use crate::domain::value_objects::CreateUserRequest;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{TransactionManager, UserRepository};
use crate::services::dispatch::VerificationDispatcher;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenManager;
use crate::services::transaction::TransactionCoordinator;

/// Registration input after trimming and validation
struct ValidatedRegistration {
    username: String,
    email: String,
    password: String,
}

impl ValidatedRegistration {
    fn parse(request: CreateUserRequest) -> Result<Self, DomainError> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        if !validators::not_empty(&username) {
            return Err(DomainError::validation("username", "username is required"));
        }
        if !validators::not_empty(&email) {
            return Err(DomainError::validation("email", "email is required"));
        }
        if !validators::is_valid_email(&email) {
            return Err(DomainError::validation("email", "invalid email format"));
        }
        if !validators::not_empty(&request.password) {
            return Err(DomainError::validation("password", "password is required"));
        }

        Ok(Self {
            username,
            email,
            password: request.password,
        })
    }
}

/// Collaborators moved into each unit of work
struct Steps<U, H, D> {
    users: Arc<U>,
    tokens: Arc<TokenManager>,
    hasher: Arc<H>,
    dispatcher: Arc<D>,
}

impl<U, H, D> Steps<U, H, D>
where
    U: UserRepository,
    H: PasswordHasher,
    D: VerificationDispatcher,
{
    async fn register(self, tx: &mut U::Tx, input: ValidatedRegistration) -> Result<User, DomainError> {
        if self.users.get_by_email(Some(&mut *tx), &input.email).await?.is_some() {
            return Err(DomainError::conflict("user already exists"));
        }

        let password_hash = self.hasher.hash(&input.password).await?;

        let user = self
            .users
            .create(
                Some(&mut *tx),
                NewUser::pending(input.username, input.email, password_hash),
            )
            .await?;

        let token = self.tokens.issue_verification_token(&user.email)?;
        self.dispatcher
            .dispatch(&user.email, &token)
            .await
            .map_err(|e| {
                error!(user_id = user.id, error = %e, "Verification dispatch failed");
                DomainError::internal("verification dispatch failed")
            })?;

        Ok(user)
    }
}

/// Creates pending accounts and redeems email-verification tokens
pub struct RegistrationWorkflow<M, U, H, D>
where
    M: TransactionManager,
    U: UserRepository<Tx = M::Tx>,
    H: PasswordHasher,
    D: VerificationDispatcher,
{
    coordinator: TransactionCoordinator<M>,
    users: Arc<U>,
    tokens: Arc<TokenManager>,
    hasher: Arc<H>,
    dispatcher: Arc<D>,
    operation_timeout: Duration,
}

impl<M, U, H, D> RegistrationWorkflow<M, U, H, D>
where
    M: TransactionManager,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
{
    pub fn new(
        coordinator: TransactionCoordinator<M>,
        users: Arc<U>,
        tokens: Arc<TokenManager>,
        hasher: Arc<H>,
        dispatcher: Arc<D>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            coordinator,
            users,
            tokens,
            hasher,
            dispatcher,
            operation_timeout,
        }
    }

    /// Register a new `pending` user and dispatch their verification token
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The committed user with its generated id
    /// * `Err(DomainError::Validation)` - A required field is empty or the email is malformed
    /// * `Err(DomainError::Conflict)` - The email is already registered
    /// * `Err(DomainError::Timeout)` - The unit of work exceeded the operation timeout
    /// * `Err(DomainError::Internal)` - Lookup, hashing, persistence or dispatch failed
    ///
    /// On every error the transaction is rolled back and no user row remains.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let input = ValidatedRegistration::parse(request)?;
        let steps = Steps {
            users: self.users.clone(),
            tokens: self.tokens.clone(),
            hasher: self.hasher.clone(),
            dispatcher: self.dispatcher.clone(),
        };

        let work = self
            .coordinator
            .with_transaction(move |tx| steps.register(tx, input).boxed());

        let user = tokio::time::timeout(self.operation_timeout, work)
            .await
            .map_err(|_| {
                warn!(timeout = ?self.operation_timeout, "Registration timed out");
                DomainError::Timeout {
                    operation: "registration".to_string(),
                }
            })??;

        info!(user_id = user.id, "User registered, awaiting email verification");
        Ok(user)
    }

    /// Redeem an email-verification token, activating its `pending` user
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationClaims)` - The user was activated
    /// * `Err(DomainError::Authentication)` - Token invalid, expired, or not a
    ///   verification token
    /// * `Err(DomainError::NotFound)` - No pending user has this email; a
    ///   second redemption of the same token lands here
    pub async fn verify_email(&self, token: &str) -> Result<VerificationClaims, DomainError> {
        let claims = self.tokens.verify_verification_token(token).map_err(|e| {
            warn!(error = %e, "Email verification token rejected");
            DomainError::Authentication(AuthError::InvalidToken(e))
        })?;

        tokio::time::timeout(
            self.operation_timeout,
            self.users.activate_by_email(None, &claims.email),
        )
        .await
        .map_err(|_| DomainError::Timeout {
            operation: "email verification".to_string(),
        })??;

        info!("Email verified, account activated");
        Ok(claims)
    }
}
