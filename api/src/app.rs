//! Application factory
//!
//! Builds the Actix-web application around an `AppState`.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ua_core::errors::DomainError;
use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};
use ua_shared::config::CorsConfig;
use ua_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::{auth::BearerAuth, cors::create_cors};
use crate::routes::auth::{
    logout::logout, profile::profile, signin::signin, signup::signup, verify::verify_email,
    AppState,
};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<M, U, H, D, C>(
    app_state: web::Data<AppState<M, U, H, D, C>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    let bearer = BearerAuth::new(app_state.gate.clone());

    // Malformed JSON bodies get the same error shape as domain validation
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(DomainError::validation("body", err.to_string())).into()
    });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<M, U, H, D, C>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/signup", web::post().to(signup::<M, U, H, D, C>))
                    .route("/signin", web::post().to(signin::<M, U, H, D, C>))
                    .route("/verify/{token}", web::get().to(verify_email::<M, U, H, D, C>))
                    .route("/logout", web::post().to(logout::<M, U, H, D, C>))
                    .service(
                        web::resource("/profile")
                            .route(web::get().to(profile::<M, U, H, D, C>))
                            .wrap(bearer),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
