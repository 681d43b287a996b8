use actix_web::{web, HttpRequest, HttpResponse};

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::authorization_header;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented access token until it would have expired anyway.
/// The header is read here rather than through the bearer middleware so that
/// logging out with an expired token succeeds without writing anything.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, malformed, or forged access token
/// - 500 Internal Server Error: Revocation store failure
pub async fn logout<M, U, H, D, C>(
    req: HttpRequest,
    state: web::Data<AppState<M, U, H, D, C>>,
) -> HttpResponse
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    let header = match authorization_header(req.headers()) {
        Ok(header) => header,
        Err(error) => return handle_domain_error(&error),
    };

    match state.gate.logout(header).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("logged out successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
