pub mod auth;
pub mod cors;

pub use auth::{authorization_header, AuthContext, BearerAuth};
pub use cors::create_cors;
