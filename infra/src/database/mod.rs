//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL user repository
//! - The transaction manager handing out typed units of work
//! - The embedded schema migration

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlTransactionManager, MySqlTx, MySqlUserRepository};
