use actix_web::{web, HttpResponse};
use tracing::warn;

use ua_core::repositories::{TransactionManager, UserRepository};
use ua_core::services::{CacheClient, PasswordHasher, VerificationDispatcher};

use crate::routes::auth::AppState;

/// Health check endpoint handler
///
/// Reports `degraded` with 503 when MySQL or the revocation cache is
/// unreachable.
pub async fn health_check<M, U, H, D, C>(state: web::Data<AppState<M, U, H, D, C>>) -> HttpResponse
where
    M: TransactionManager + 'static,
    U: UserRepository<Tx = M::Tx> + 'static,
    H: PasswordHasher + 'static,
    D: VerificationDispatcher + 'static,
    C: CacheClient + 'static,
{
    let cache_up = match state.revocations.ping().await {
        Ok(()) => true,
        Err(error) => {
            warn!(error = %error, "Health check: cache unreachable");
            false
        }
    };

    let database_up = match state.database.ping().await {
        Ok(()) => true,
        Err(error) => {
            warn!(error = %error, "Health check: database unreachable");
            false
        }
    };

    let healthy = cache_up && database_up;
    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "userauth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": if database_up { "up" } else { "down" },
        "cache": if cache_up { "up" } else { "down" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
