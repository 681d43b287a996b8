//! Unit tests for the authorization gate

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::services::gate::{extract_bearer, AuthorizationGate};
use crate::services::revocation::{remaining_ttl, MockCacheClient, SessionRevocationStore};
use crate::services::testing::{token_manager, TEST_SECRET};
use crate::services::token::TokenManager;

fn setup() -> (Arc<TokenManager>, Arc<MockCacheClient>, AuthorizationGate<MockCacheClient>) {
    let tokens = token_manager();
    let cache = Arc::new(MockCacheClient::new());
    let store = Arc::new(SessionRevocationStore::new(cache.clone()));
    (tokens.clone(), cache, AuthorizationGate::new(tokens, store))
}

fn expired_access_token(secret: &str) -> String {
    encode(
        &Header::default(),
        &json!({"type": "access", "user_id": 1, "email": "a@x.io", "exp": Utc::now().timestamp() - 30}),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[test]
fn test_extract_bearer() {
    assert_eq!(extract_bearer(Some("Bearer abc")).unwrap(), "abc");

    assert!(matches!(
        extract_bearer(None),
        Err(DomainError::Authentication(AuthError::MissingHeader))
    ));

    for bad in ["abc", "Bearer", "Bearer ", "Basic abc", "bearer abc", "Bearer a b", "Bearer  abc"] {
        assert!(
            matches!(
                extract_bearer(Some(bad)),
                Err(DomainError::Authentication(AuthError::MalformedHeader))
            ),
            "accepted {:?}",
            bad
        );
    }
}

#[tokio::test]
async fn test_authorize_valid_token() {
    let (tokens, _, gate) = setup();
    let token = tokens.issue_access_token(7, "alice@x.io").unwrap();

    let principal = gate.authorize(Some(&bearer(&token))).await.unwrap();
    assert_eq!(principal.user_id, 7);
    assert_eq!(principal.email, "alice@x.io");
}

#[tokio::test]
async fn test_forged_token_never_reaches_store() {
    let (_, cache, gate) = setup();
    let forged = TokenManager::new(crate::services::token::TokenManagerConfig {
        jwt_secret: "forger".to_string(),
        ..Default::default()
    })
    .issue_access_token(7, "alice@x.io")
    .unwrap();

    let err = gate.authorize(Some(&bearer(&forged))).await.unwrap_err();

    assert_eq!(err.token_error(), Some(TokenError::BadSignature));
    assert_eq!(cache.get_calls(), 0);
}

#[tokio::test]
async fn test_non_access_tokens_rejected() {
    let (tokens, cache, gate) = setup();
    let refresh = tokens.issue_refresh_token(7).unwrap();
    let verification = tokens.issue_verification_token("alice@x.io").unwrap();

    for token in [refresh, verification] {
        let err = gate.authorize(Some(&bearer(&token))).await.unwrap_err();
        assert_eq!(err.token_error(), Some(TokenError::MalformedClaims));
    }
    assert_eq!(cache.get_calls(), 0);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (tokens, cache, gate) = setup();
    let token = tokens.issue_access_token(7, "alice@x.io").unwrap();
    let header = bearer(&token);

    gate.authorize(Some(&header)).await.unwrap();
    gate.logout(Some(&header)).await.unwrap();

    let err = gate.authorize(Some(&header)).await.unwrap_err();
    assert!(matches!(err, DomainError::Authentication(AuthError::TokenRevoked)));

    // Entry lives as long as the token's remaining lifetime
    let ttl = cache.ttl(&token).await.unwrap().as_secs();
    assert!((898..=901).contains(&ttl), "ttl {}", ttl);
}

#[tokio::test]
async fn test_logout_in_final_second_revokes_token() {
    let (_, cache, gate) = setup();
    let token = encode(
        &Header::default(),
        &json!({"type": "access", "user_id": 1, "email": "a@x.io", "exp": Utc::now().timestamp()}),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    gate.logout_token(&token).await.unwrap();

    // Either the entry was written or the token expired in between
    match gate.authorize_token(&token).await {
        Err(DomainError::Authentication(AuthError::TokenRevoked)) => {
            assert_eq!(cache.set_calls(), 1);
            let ttl = cache.ttl(&token).await.unwrap();
            assert!(ttl.as_millis() > 0);
        }
        Err(err) => assert_eq!(err.token_error(), Some(TokenError::Expired)),
        Ok(principal) => panic!("token accepted after logout: {:?}", principal),
    }
}

#[test]
fn test_revocation_outlives_final_second() {
    let now = Utc::now().timestamp();
    assert_eq!(remaining_ttl(now, now), 1);
    assert_eq!(remaining_ttl(now + 60, now), 61);
    assert_eq!(remaining_ttl(now - 1, now), 0);
}

#[tokio::test]
async fn test_logout_expired_token_is_noop() {
    let (_, cache, gate) = setup();
    let expired = expired_access_token(TEST_SECRET);

    gate.logout(Some(&bearer(&expired))).await.unwrap();

    assert_eq!(cache.set_calls(), 0);
}

#[tokio::test]
async fn test_logout_forged_token_rejected() {
    let (_, cache, gate) = setup();
    let forged = expired_access_token("forger");

    let err = gate.logout(Some(&bearer(&forged))).await.unwrap_err();
    assert_eq!(err.token_error(), Some(TokenError::BadSignature));
    assert_eq!(cache.set_calls(), 0);

    assert!(matches!(
        gate.logout(None).await,
        Err(DomainError::Authentication(AuthError::MissingHeader))
    ));
}

#[tokio::test]
async fn test_store_failure_denies_access() {
    let (tokens, cache, gate) = setup();
    let token = tokens.issue_access_token(7, "alice@x.io").unwrap();
    cache.set_fail(true);

    let err = gate.authorize(Some(&bearer(&token))).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));

    let err = gate.logout(Some(&bearer(&token))).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}

#[tokio::test]
async fn test_expired_token_denied() {
    let (_, cache, gate) = setup();
    let expired = expired_access_token(TEST_SECRET);

    let err = gate.authorize(Some(&bearer(&expired))).await.unwrap_err();
    assert_eq!(err.token_error(), Some(TokenError::Expired));
    assert_eq!(cache.get_calls(), 0);
}
