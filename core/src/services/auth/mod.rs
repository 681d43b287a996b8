//! Authentication service module
//!
//! Sign-in with email and password, and account lookups for authenticated
//! callers.

mod service;


pub use service::AuthService;
