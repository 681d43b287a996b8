//! Mapping of domain errors onto HTTP responses
//!
//! Every error leaves the service as a shared `ErrorResponse` body. Internal
//! failures are logged in full and answered with a generic message.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};

use ua_core::errors::{AuthError, DomainError, TokenError};
use ua_shared::{error_codes, ErrorResponse};

/// Domain error carried through actix's error machinery
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Authentication(_) | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn token_code(error: TokenError) -> &'static str {
    match error {
        TokenError::Expired => error_codes::TOKEN_EXPIRED,
        TokenError::BadSignature | TokenError::MalformedClaims => error_codes::TOKEN_INVALID,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let body = match error {
        DomainError::Validation { field, message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
                .add_detail("field", field)
        }
        DomainError::Authentication(auth) => {
            warn!(error = %auth, "Authentication rejected");
            let code = match auth {
                AuthError::TokenRevoked => error_codes::TOKEN_REVOKED,
                AuthError::InvalidToken(token) => token_code(*token),
                _ => error_codes::UNAUTHORIZED,
            };
            ErrorResponse::new(code, auth.to_string())
        }
        DomainError::Token(token) => {
            warn!(error = %token, "Token rejected");
            ErrorResponse::new(token_code(*token), token.to_string())
        }
        DomainError::Conflict { message } => {
            ErrorResponse::new(error_codes::CONFLICT, message.clone())
        }
        DomainError::NotFound { resource } => {
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))
        }
        DomainError::Timeout { operation } => {
            warn!(operation = %operation, "Operation timed out");
            ErrorResponse::new(error_codes::TIMEOUT, "the request timed out")
        }
        DomainError::Internal { message } => {
            error!(error = %message, "Internal error");
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "an internal error occurred")
        }
    };

    HttpResponse::build(status).json(body)
}
