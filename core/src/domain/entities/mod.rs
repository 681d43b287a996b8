//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    AccessClaims, RefreshClaims, TokenClaims, TokenPair, VerificationClaims,
    VERIFICATION_TOKEN_TTL_MINUTES,
};
pub use user::{NewUser, User, UserStatus};
