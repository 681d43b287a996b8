//! Value objects representing immutable domain concepts.

pub mod principal;
pub mod requests;

// Re-export commonly used types
pub use principal::{Principal, UserProfile};
pub use requests::{CreateUserRequest, SignInRequest};
