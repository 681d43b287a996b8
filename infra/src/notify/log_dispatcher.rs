//! Dispatcher that writes verification links to the log
//!
//! Stands in for an email sender: the link an operator would mail is
//! emitted at `info` level so it can be picked up from the service logs.

use async_trait::async_trait;
use tracing::info;

use ua_core::errors::DomainError;
use ua_core::services::VerificationDispatcher;

/// Path the verification link points at, relative to the base URL
const VERIFY_PATH: &str = "/api/v1/auth/verify";

#[derive(Debug, Clone)]
pub struct LogVerificationDispatcher {
    base_url: String,
}

impl LogVerificationDispatcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Full link a user follows to activate their account
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}{}/{}", self.base_url.trim_end_matches('/'), VERIFY_PATH, token)
    }
}

#[async_trait]
impl VerificationDispatcher for LogVerificationDispatcher {
    async fn dispatch(&self, email: &str, token: &str) -> Result<(), DomainError> {
        info!(
            email = %email,
            link = %self.verification_link(token),
            "Verification link issued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_link() {
        let dispatcher = LogVerificationDispatcher::new("http://localhost:8080");
        assert_eq!(
            dispatcher.verification_link("abc.def.ghi"),
            "http://localhost:8080/api/v1/auth/verify/abc.def.ghi"
        );
    }

    #[test]
    fn test_verification_link_trims_trailing_slash() {
        let dispatcher = LogVerificationDispatcher::new("https://auth.example.com/");
        assert_eq!(
            dispatcher.verification_link("t"),
            "https://auth.example.com/api/v1/auth/verify/t"
        );
    }

    #[tokio::test]
    async fn test_dispatch_succeeds() {
        let dispatcher = LogVerificationDispatcher::new("http://localhost:8080");
        assert!(dispatcher.dispatch("alice@example.com", "tok").await.is_ok());
    }
}
