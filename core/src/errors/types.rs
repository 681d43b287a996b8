//! Error type definitions for authentication and token operations
//!
//! Messages here are safe to show to API clients; they never carry token
//! material, password data or infrastructure detail.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("token revoked")]
    TokenRevoked,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email not verified")]
    EmailNotVerified,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

/// Token verification errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Unreadable header, non-HMAC algorithm, or signature mismatch
    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,

    /// Required claims absent, of the wrong type, or an unexpected token type
    #[error("malformed claims")]
    MalformedClaims,
}
