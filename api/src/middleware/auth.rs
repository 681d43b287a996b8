//! Bearer authentication middleware for protecting API endpoints.
//!
//! The middleware hands the `Authorization` header to the authorization gate
//! and, on success, injects an `AuthContext` into the request extensions.
//! Rejections short-circuit with the same JSON error body as every handler,
//! returned as a response rather than an `Err` so outer middleware sees it.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ua_core::domain::value_objects::Principal;
use ua_core::errors::{AuthError, DomainError};
use ua_core::services::{AuthorizationGate, CacheClient};

use crate::handlers::{handle_domain_error, ApiError};

/// Identity of the caller, injected into authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
}

impl From<Principal> for AuthContext {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.user_id,
            email: principal.email,
        }
    }
}

/// Raw `Authorization` header value
///
/// A value that is not visible ASCII is a malformed header.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, DomainError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| DomainError::from(AuthError::MalformedHeader))
        })
        .transpose()
}

/// Bearer authentication middleware factory
pub struct BearerAuth<C: CacheClient> {
    gate: Arc<AuthorizationGate<C>>,
}

impl<C: CacheClient> BearerAuth<C> {
    pub fn new(gate: Arc<AuthorizationGate<C>>) -> Self {
        Self { gate }
    }
}

impl<S, B, C> Transform<S, ServiceRequest> for BearerAuth<C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    C: CacheClient + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S, C>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S, C: CacheClient> {
    service: Rc<S>,
    gate: Arc<AuthorizationGate<C>>,
}

impl<S, B, C> Service<ServiceRequest> for BearerAuthMiddleware<S, C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    C: CacheClient + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = self.gate.clone();

        Box::pin(async move {
            let authorized = match authorization_header(req.headers()) {
                Ok(header) => {
                    let header = header.map(str::to_owned);
                    gate.authorize(header.as_deref()).await
                }
                Err(error) => Err(error),
            };

            match authorized {
                Ok(principal) => {
                    req.extensions_mut().insert(AuthContext::from(principal));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError::from(DomainError::from(AuthError::MissingHeader))));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    #[test]
    fn test_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers).unwrap(), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization_header(&headers).unwrap(), Some("Bearer abc"));

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
        );
        assert!(matches!(
            authorization_header(&headers),
            Err(DomainError::Authentication(AuthError::MalformedHeader))
        ));
    }

    #[test]
    fn test_auth_context_from_principal() {
        let context = AuthContext::from(Principal {
            user_id: 42,
            email: "alice@example.com".to_string(),
        });
        assert_eq!(context.user_id, 42);
        assert_eq!(context.email, "alice@example.com");
    }
}
