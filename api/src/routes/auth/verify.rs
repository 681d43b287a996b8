use actix_web::{web, HttpResponse};

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for GET /api/v1/auth/verify/{token}
///
/// Redeems an email-verification token and activates the account.
///
/// ## Errors
/// - 401 Unauthorized: Token invalid, expired, or not a verification token
/// - 404 Not Found: No pending account for the token's email
pub async fn verify_email<M, U, H, D, C>(
    state: web::Data<AppState<M, U, H, D, C>>,
    token: web::Path<String>,
) -> HttpResponse
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    match state.registration.verify_email(&token).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("email verified, account activated")),
        Err(error) => handle_domain_error(&error),
    }
}
