//! Tests of the bearer middleware and the logout endpoint's header handling

mod common;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::Value;

use ua_api::create_app;
use ua_core::services::TokenManager;
use ua_core::{NewUser, UserRepository};
use ua_shared::config::CorsConfig;

use common::{bearer, context, token_config};

async fn seed_active_user(ctx: &common::TestContext) -> i64 {
    let user = ctx
        .users
        .create(None, NewUser::pending("alice", "alice@example.com", "unused"))
        .await
        .unwrap();
    ctx.users
        .activate_by_email(None, "alice@example.com")
        .await
        .unwrap();
    user.id
}

#[actix_web::test]
async fn test_profile_without_header() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "missing authorization header");
}

#[actix_web::test]
async fn test_profile_with_malformed_headers() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    for value in ["Token abc", "Bearer", "Bearer a b", "bearer abc"] {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/profile")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", value);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "malformed authorization header");
    }
}

#[actix_web::test]
async fn test_forged_token_never_reaches_cache() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let mut other = token_config(900);
    other.jwt_secret = "some-other-secret".to_string();
    let forged = TokenManager::new(other)
        .issue_access_token(1, "alice@example.com")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&forged))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
    assert_eq!(ctx.cache.get_calls(), 0);
}

#[actix_web::test]
async fn test_refresh_token_is_not_an_access_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;
    let user_id = seed_active_user(&ctx).await;

    let refresh = TokenManager::new(token_config(900))
        .issue_refresh_token(user_id)
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_access_token_is_rejected() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;
    let user_id = seed_active_user(&ctx).await;

    let expired = TokenManager::new(token_config(-60))
        .issue_access_token(user_id, "alice@example.com")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&expired))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_revocation_store_failure_denies_access() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;
    let user_id = seed_active_user(&ctx).await;

    let access = TokenManager::new(token_config(900))
        .issue_access_token(user_id, "alice@example.com")
        .unwrap();
    ctx.cache.set_fail(true);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "an internal error occurred");
}

#[actix_web::test]
async fn test_profile_of_deleted_principal_is_not_found() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let access = TokenManager::new(token_config(900))
        .issue_access_token(999, "ghost@example.com")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_logout_with_expired_token_is_noop() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let expired = TokenManager::new(token_config(-60))
        .issue_access_token(1, "alice@example.com")
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&expired))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.cache.set_calls(), 0);
}

#[actix_web::test]
async fn test_logout_requires_header() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "missing authorization header");
}

#[actix_web::test]
async fn test_logout_with_forged_token_is_rejected() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer("abc.def.ghi"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.cache.set_calls(), 0);
}
