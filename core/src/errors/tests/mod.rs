//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_auth_error_messages() {
    assert_eq!(AuthError::MissingHeader.to_string(), "missing authorization header");
    assert_eq!(AuthError::MalformedHeader.to_string(), "malformed authorization header");
    assert_eq!(AuthError::TokenRevoked.to_string(), "token revoked");
    assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid email or password");
}

#[test]
fn test_token_error_wraps_into_auth_error() {
    let err: AuthError = TokenError::Expired.into();
    assert_eq!(err, AuthError::InvalidToken(TokenError::Expired));
    assert_eq!(err.to_string(), "invalid token: token expired");
}

#[test]
fn test_domain_error_classification() {
    let token: DomainError = TokenError::BadSignature.into();
    assert!(token.is_authentication());
    assert_eq!(token.token_error(), Some(TokenError::BadSignature));

    let auth: DomainError = AuthError::InvalidToken(TokenError::MalformedClaims).into();
    assert!(auth.is_authentication());
    assert_eq!(auth.token_error(), Some(TokenError::MalformedClaims));

    let conflict = DomainError::conflict("user already exists");
    assert!(!conflict.is_authentication());
    assert_eq!(conflict.token_error(), None);
}

#[test]
fn test_validation_error_names_field() {
    let err = DomainError::validation("username", "must not be empty");
    assert!(err.to_string().contains("username"));
    match err {
        DomainError::Validation { field, .. } => assert_eq!(field, "username"),
        other => panic!("unexpected error: {other:?}"),
    }
}
