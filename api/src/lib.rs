//! # UserAuth API
//!
//! Actix-web surface over the identity and session core: signup, email
//! verification, sign-in, profile and logout.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::auth::AppState;
