pub mod auth;

pub use auth::{validation_error, MessageResponse, SignInBody, SignUpBody, UserResponse};
