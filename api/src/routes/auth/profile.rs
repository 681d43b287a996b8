use actix_web::{web, HttpResponse};

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/profile
///
/// Requires authentication via Bearer token in Authorization header.
pub async fn profile<M, U, H, D, C>(
    state: web::Data<AppState<M, U, H, D, C>>,
    auth: AuthContext,
) -> HttpResponse
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(&error),
    }
}
