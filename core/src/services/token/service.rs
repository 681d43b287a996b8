//! Main token manager implementation

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{
    AccessClaims, RefreshClaims, TokenClaims, TokenPair, VerificationClaims,
    VERIFICATION_TOKEN_TTL_MINUTES,
};
use crate::errors::{DomainError, TokenError};

use super::config::TokenManagerConfig;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Signs and verifies bearer tokens
///
/// Holds only the immutable key material and configured lifetimes, so one
/// instance is shared across all request workers.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    /// Creates a new token manager
    pub fn new(config: TokenManagerConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl: Duration::seconds(config.access_token_expiry_seconds),
            refresh_ttl: Duration::seconds(config.refresh_token_expiry_seconds),
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Issues an access token expiring after the configured access lifetime
    pub fn issue_access_token(&self, user_id: i64, email: &str) -> Result<String, DomainError> {
        self.encode_jwt(&TokenClaims::Access(AccessClaims {
            user_id,
            email: email.to_string(),
            exp: (Utc::now() + self.access_ttl).timestamp(),
        }))
    }

    /// Issues a refresh token expiring after the configured refresh lifetime
    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String, DomainError> {
        self.encode_jwt(&TokenClaims::Refresh(RefreshClaims {
            user_id,
            exp: (Utc::now() + self.refresh_ttl).timestamp(),
        }))
    }

    /// Issues an email-verification token valid for 15 minutes
    pub fn issue_verification_token(&self, email: &str) -> Result<String, DomainError> {
        self.encode_jwt(&TokenClaims::EmailVerification(VerificationClaims {
            email: email.to_string(),
            exp: (Utc::now() + Duration::minutes(VERIFICATION_TOKEN_TTL_MINUTES)).timestamp(),
        }))
    }

    /// Issues the access and refresh tokens returned at sign-in
    pub fn issue_token_pair(&self, user_id: i64, email: &str) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(user_id, email)?;
        let refresh_token = self.issue_refresh_token(user_id)?;
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.access_token_ttl_seconds(),
        ))
    }

    /// Verifies a token of any kind and returns its claims
    ///
    /// The signature is checked before expiry, so a forged token reports
    /// `BadSignature` even when its `exp` has passed.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - Signature valid, not expired, claims well formed
    /// * `Err(TokenError::BadSignature)` - Unreadable header, non-HMAC
    ///   algorithm, or signature mismatch
    /// * `Err(TokenError::Expired)` - `exp` has passed
    /// * `Err(TokenError::MalformedClaims)` - Claims missing, mistyped, or of
    ///   an unknown token type
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::BadSignature)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::BadSignature);
        }

        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::MalformedClaims
                }
                _ => TokenError::BadSignature,
            })
    }

    /// Verifies a token and requires it to be an access token
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        match self.verify_token(token)? {
            TokenClaims::Access(claims) => Ok(claims),
            _ => Err(TokenError::MalformedClaims),
        }
    }

    /// Verifies a token and requires it to be an email-verification token
    pub fn verify_verification_token(&self, token: &str) -> Result<VerificationClaims, TokenError> {
        match self.verify_token(token)? {
            TokenClaims::EmailVerification(claims) => Ok(claims),
            _ => Err(TokenError::MalformedClaims),
        }
    }

    fn encode_jwt(&self, claims: &TokenClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token signing failed: {}", e)))
    }
}
