//! Blacklist of revoked bearer tokens

use std::sync::Arc;
use tracing::debug;

use crate::errors::DomainError;

use super::traits::CacheClient;

/// Value stored for every revoked token
pub const REVOKED_MARKER: &str = "blacklisted";

/// Seconds a revocation entry must live for a token expiring at `exp`
///
/// A token still verifies during its `exp` second, so the entry covers that
/// second too. Zero only once `exp` has passed.
pub fn remaining_ttl(exp: i64, now: i64) -> u64 {
    if exp < now {
        return 0;
    }
    u64::try_from(exp.saturating_sub(now)).map_or(0, |secs| secs.saturating_add(1))
}

/// Records revoked tokens under their raw token string
///
/// An entry lives exactly as long as the token it revokes would still verify,
/// so the blacklist never grows past the set of live tokens.
pub struct SessionRevocationStore<C: CacheClient> {
    cache: Arc<C>,
}

impl<C: CacheClient> SessionRevocationStore<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Whether `token` has been revoked
    pub async fn check(&self, token: &str) -> Result<bool, DomainError> {
        let value = self.cache.get(token).await?;
        Ok(value.as_deref() == Some(REVOKED_MARKER))
    }

    /// Revoke `token` for `ttl_seconds`
    ///
    /// A zero TTL means the token has already expired; nothing is written.
    pub async fn revoke(&self, token: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        if ttl_seconds == 0 {
            debug!("Token already expired, skipping revocation entry");
            return Ok(());
        }

        self.cache.set(token, REVOKED_MARKER, ttl_seconds).await?;
        debug!(ttl_seconds, "Token revoked");
        Ok(())
    }

    /// Cache reachability, used by health checks
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.cache.ping().await
    }
}
