//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Every fallible operation in the core returns this type. The HTTP layer maps
/// each variant to one status code and never exposes the `Internal` message.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Authentication(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// True for failures a client caused by presenting bad credentials or tokens
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::Token(_))
    }

    /// The token failure behind this error, if any
    pub fn token_error(&self) -> Option<TokenError> {
        match self {
            Self::Token(err) => Some(*err),
            Self::Authentication(AuthError::InvalidToken(err)) => Some(*err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
