//! Request and response bodies for the authentication endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use ua_core::domain::entities::user::{User, UserStatus};
use ua_core::domain::value_objects::{CreateUserRequest, SignInRequest};
use ua_core::errors::DomainError;

/// Body of `POST /signup`
///
/// Only upper bounds are checked here; emptiness and email format are
/// enforced by the registration workflow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpBody {
    #[validate(length(max = 100))]
    pub username: String,

    #[validate(length(max = 255))]
    pub email: String,

    /// bcrypt only reads the first 72 bytes
    #[validate(length(max = 72))]
    pub password: String,
}

impl From<SignUpBody> for CreateUserRequest {
    fn from(body: SignUpBody) -> Self {
        CreateUserRequest::new(body.username, body.email, body.password)
    }
}

/// Body of `POST /signin`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInBody {
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(length(max = 72))]
    pub password: String,
}

impl From<SignInBody> for SignInRequest {
    fn from(body: SignInBody) -> Self {
        SignInRequest {
            email: body.email,
            password: body.password,
        }
    }
}

/// A freshly registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// First failing field of a validator run, as a domain validation error
pub fn validation_error(errors: &ValidationErrors) -> DomainError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    match fields.first() {
        Some(field) => DomainError::validation(*field, format!("{} is too long", field)),
        None => DomainError::validation("body", "invalid request body"),
    }
}
