use actix_web::{web, HttpResponse};
use validator::Validate;

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::dto::{validation_error, SignInBody};
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/signin
///
/// Exchanges email and password for an access/refresh token pair.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Email or password missing
/// - 401 Unauthorized: Wrong credentials, or the email is not verified yet
pub async fn signin<M, U, H, D, C>(
    state: web::Data<AppState<M, U, H, D, C>>,
    body: web::Json<SignInBody>,
) -> HttpResponse
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    let body = body.into_inner();
    if let Err(errors) = body.validate() {
        return handle_domain_error(&validation_error(&errors));
    }

    match state.auth_service.sign_in(body.into()).await {
        Ok(pair) => HttpResponse::Ok().json(pair),
        Err(error) => handle_domain_error(&error),
    }
}
