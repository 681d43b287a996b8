//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};
use tracing::{info, warn};

use ua_shared::config::CorsConfig;

/// Build the CORS middleware from configuration
///
/// An origin of `*` allows any origin. Methods and headers that do not parse
/// are skipped with a warning.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    for origin in &config.allowed_origins {
        if origin == "*" {
            info!("Allowing any CORS origin");
            cors = cors.allow_any_origin();
        } else {
            info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match Method::from_bytes(m.as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                warn!("Ignoring invalid CORS method: {}", m);
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
            Ok(name) => Some(name),
            Err(_) => {
                warn!("Ignoring invalid CORS header: {}", h);
                None
            }
        })
        .collect();

    cors = cors
        .allowed_methods(methods)
        .allowed_headers(headers)
        .expose_headers(vec![HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
