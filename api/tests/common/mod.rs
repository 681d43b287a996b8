//! Shared wiring for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;

use ua_api::AppState;
use ua_core::services::{
    AuthService, AuthorizationGate, BcryptPasswordHasher, SessionRevocationStore, TokenManager,
    TokenManagerConfig, TransactionCoordinator,
};
use ua_core::{MockCacheClient, MockUserRepository, RecordingDispatcher, RegistrationWorkflow};

pub const TEST_SECRET: &str = "api-test-secret";

pub type TestState = AppState<
    MockUserRepository,
    MockUserRepository,
    BcryptPasswordHasher,
    RecordingDispatcher,
    MockCacheClient,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: MockUserRepository,
    pub cache: MockCacheClient,
    pub dispatcher: RecordingDispatcher,
}

pub fn token_config(access_expiry_seconds: i64) -> TokenManagerConfig {
    TokenManagerConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry_seconds: access_expiry_seconds,
        refresh_token_expiry_seconds: 604800,
    }
}

pub fn context() -> TestContext {
    let users = MockUserRepository::new();
    let cache = MockCacheClient::new();
    let dispatcher = RecordingDispatcher::new();

    let tokens = Arc::new(TokenManager::new(token_config(900)));
    let hasher = Arc::new(BcryptPasswordHasher::new(4).unwrap());
    let repo = Arc::new(users.clone());
    let revocations = Arc::new(SessionRevocationStore::new(Arc::new(cache.clone())));

    let registration = Arc::new(RegistrationWorkflow::new(
        TransactionCoordinator::new(repo.clone()),
        repo.clone(),
        tokens.clone(),
        hasher.clone(),
        Arc::new(dispatcher.clone()),
        Duration::from_secs(10),
    ));

    let state = web::Data::new(AppState {
        registration,
        auth_service: Arc::new(AuthService::new(repo.clone(), tokens.clone(), hasher)),
        gate: Arc::new(AuthorizationGate::new(tokens, revocations.clone())),
        revocations,
        database: repo,
    });

    TestContext {
        state,
        users,
        cache,
        dispatcher,
    }
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token),
    )
}
