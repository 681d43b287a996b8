//! Token entities for JWT-based authentication.
//!
//! Every token carries a `type` discriminator next to its claims, so a decoded
//! payload is one of three shapes and never an untyped map.

use serde::{Deserialize, Serialize};

/// Email-verification tokens always live this long, whatever the configured
/// access and refresh lifetimes are
pub const VERIFICATION_TOKEN_TTL_MINUTES: i64 = 15;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,
    pub email: String,
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: i64,
    pub exp: i64,
}

/// Claims carried by an email-verification token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub email: String,
    pub exp: i64,
}

/// Decoded token payload, tagged by the `type` claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
    EmailVerification(VerificationClaims),
}

impl TokenClaims {
    /// Expiration timestamp regardless of token type
    pub fn exp(&self) -> i64 {
        match self {
            TokenClaims::Access(claims) => claims.exp,
            TokenClaims::Refresh(claims) => claims.exp,
            TokenClaims::EmailVerification(claims) => claims.exp,
        }
    }

    /// Value of the `type` claim
    pub fn kind(&self) -> &'static str {
        match self {
            TokenClaims::Access(_) => "access",
            TokenClaims::Refresh(_) => "refresh",
            TokenClaims::EmailVerification(_) => "email_verification",
        }
    }
}

/// Access and refresh tokens returned by sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
