//! MySQL implementation of the TransactionManager trait.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use ua_core::errors::DomainError;
use ua_core::repositories::TransactionManager;

use super::map_sqlx_error;

/// Unit-of-work handle for MySQL
///
/// Dropping it without commit or rollback rolls the transaction back.
pub type MySqlTx = Transaction<'static, MySql>;

/// Hands out transactions from the pool
///
/// The pool pins every connection to READ COMMITTED, so each transaction
/// begun here runs at that isolation level.
#[derive(Clone)]
pub struct MySqlTransactionManager {
    pool: MySqlPool,
}

impl MySqlTransactionManager {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for MySqlTransactionManager {
    type Tx = MySqlTx;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", e))?;
        tracing::debug!("Transaction started");
        Ok(tx)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit transaction", e))?;
        tracing::debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), DomainError> {
        tx.rollback()
            .await
            .map_err(|e| map_sqlx_error("Failed to roll back transaction", e))?;
        tracing::debug!("Transaction rolled back");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Database health check failed", e))?;

        if value != 1 {
            tracing::warn!("Database health check returned unexpected value: {}", value);
            return Err(DomainError::internal("unexpected health check result"));
        }
        Ok(())
    }
}
