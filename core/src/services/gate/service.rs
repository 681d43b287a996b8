//! Bearer-token gate backed by the token manager and the revocation store

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::value_objects::Principal;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::services::revocation::{remaining_ttl, CacheClient, SessionRevocationStore};
use crate::services::token::TokenManager;

/// Extract the token from an `Authorization` header value
///
/// The value must be exactly `Bearer <token>`: two parts separated by a
/// single space, with the scheme spelled `Bearer`.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, DomainError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader.into()),
    }
}

/// Decides whether a request may reach a protected operation
pub struct AuthorizationGate<C: CacheClient> {
    tokens: Arc<TokenManager>,
    revocations: Arc<SessionRevocationStore<C>>,
}

impl<C: CacheClient> AuthorizationGate<C> {
    pub fn new(tokens: Arc<TokenManager>, revocations: Arc<SessionRevocationStore<C>>) -> Self {
        Self {
            tokens,
            revocations,
        }
    }

    /// Authorize a request from its `Authorization` header
    pub async fn authorize(&self, header: Option<&str>) -> Result<Principal, DomainError> {
        let token = extract_bearer(header)?;
        self.authorize_token(token).await
    }

    /// Authorize a raw access token
    ///
    /// The token is verified before the revocation store is consulted, so
    /// forged or expired tokens never reach the cache. A store failure denies
    /// access.
    pub async fn authorize_token(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.tokens.verify_access_token(token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            DomainError::Authentication(AuthError::InvalidToken(e))
        })?;

        let revoked = self.revocations.check(token).await.map_err(|e| {
            error!(error = %e, "Revocation lookup failed, denying access");
            e
        })?;
        if revoked {
            warn!(user_id = claims.user_id, "Revoked token presented");
            return Err(AuthError::TokenRevoked.into());
        }

        Ok(Principal::from(claims))
    }

    /// Log out the bearer of an `Authorization` header
    pub async fn logout(&self, header: Option<&str>) -> Result<(), DomainError> {
        let token = extract_bearer(header)?;
        self.logout_token(token).await
    }

    /// Revoke an access token for the rest of its lifetime
    ///
    /// A correctly signed token that has already expired is accepted and
    /// nothing is written.
    pub async fn logout_token(&self, token: &str) -> Result<(), DomainError> {
        let claims = match self.tokens.verify_access_token(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                debug!("Logout with expired token, nothing to revoke");
                return Ok(());
            }
            Err(e) => return Err(AuthError::InvalidToken(e).into()),
        };

        let ttl = remaining_ttl(claims.exp, Utc::now().timestamp());
        self.revocations.revoke(token, ttl).await?;

        info!(user_id = claims.user_id, "User logged out");
        Ok(())
    }
}
