//! MySQL implementations of the core repository traits

pub mod transaction_manager;
pub mod user_repository_impl;

pub use transaction_manager::{MySqlTransactionManager, MySqlTx};
pub use user_repository_impl::MySqlUserRepository;

use ua_core::errors::DomainError;

/// True when `err` is a unique-key violation
pub(crate) fn is_duplicate_key(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Map a SQLx failure into the domain taxonomy
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    if is_duplicate_key(&err) {
        return DomainError::conflict("user already exists");
    }
    tracing::error!("{}: {}", context, err);
    DomainError::internal(format!("{}: {}", context, err))
}
