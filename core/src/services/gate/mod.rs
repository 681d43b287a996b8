//! Per-request authorization for protected operations

mod service;

#[cfg(test)]
mod tests;

pub use service::{extract_bearer, AuthorizationGate};
