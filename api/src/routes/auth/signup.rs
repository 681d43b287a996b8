use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::dto::{validation_error, SignUpBody, UserResponse};
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// Registers a `pending` user and hands a verification token to the
/// dispatcher. The account cannot sign in until the token is redeemed.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "email": "alice@example.com",
///     "password": "s3cret!"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "id": 1,
///     "username": "alice",
///     "email": "alice@example.com",
///     "status": "pending",
///     "created_at": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: A field is missing, too long, or the email is malformed
/// - 409 Conflict: The email is already registered
/// - 504 Gateway Timeout: Registration did not finish in time
/// - 500 Internal Server Error: Storage, hashing or dispatch failure
pub async fn signup<M, U, H, D, C>(
    state: web::Data<AppState<M, U, H, D, C>>,
    body: web::Json<SignUpBody>,
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

    match state.registration.create(body.into()).await {
        Ok(user) => {
            info!(user_id = user.id, "Signup accepted");
            HttpResponse::Created().json(UserResponse::from(user))
        }
        Err(error) => handle_domain_error(&error),
    }
}
