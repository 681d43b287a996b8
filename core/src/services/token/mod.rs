//! Token service module for JWT management
//!
//! Issues and verifies the three token kinds the system uses:
//! - access tokens presented as bearer credentials
//! - refresh tokens returned at sign-in
//! - short-lived email-verification tokens

mod config;
mod service;


pub use config::TokenManagerConfig;
pub use service::TokenManager;
