//! Session revocation module
//!
//! Logged-out tokens are recorded in a shared cache until they would have
//! expired anyway.

mod mock;
mod store;
mod traits;


pub use mock::MockCacheClient;
pub use store::{remaining_ttl, SessionRevocationStore, REVOKED_MARKER};
pub use traits::CacheClient;
