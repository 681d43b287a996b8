//! Runs a unit of work inside one transaction

use futures_util::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::DomainError;
use crate::repositories::TransactionManager;

/// Future returned by a unit of work, borrowing the transaction handle
pub type UnitOfWork<'t, T> = BoxFuture<'t, Result<T, DomainError>>;

/// Wraps units of work in atomic, rollback-safe transactions
///
/// Invocations are independent; nothing is serialized across them. Nested
/// invocations are not supported: code inside a unit of work passes the
/// handle it was given to every repository call.
pub struct TransactionCoordinator<M: TransactionManager> {
    manager: Arc<M>,
}

impl<M: TransactionManager> Clone for TransactionCoordinator<M> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
        }
    }
}

impl<M: TransactionManager> TransactionCoordinator<M> {
    pub fn new(manager: Arc<M>) -> Self {
        Self { manager }
    }

    /// Begin a transaction, run `work` with it, and settle it
    ///
    /// * `Ok` from `work` commits; a commit failure is returned instead of the value
    /// * `Err` from `work` rolls back, then returns the original error
    /// * A panic in `work`, or dropping the returned future, drops the handle
    ///   unsettled and the handle's drop rolls it back; panics keep unwinding
    pub async fn with_transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut M::Tx) -> UnitOfWork<'t, T> + Send,
    {
        let mut tx = self.manager.begin().await?;
        debug!("Transaction started");

        match work(&mut tx).await {
            Ok(value) => {
                self.manager.commit(tx).await?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.manager.rollback(tx).await {
                    error!(error = %rollback_err, "Transaction rollback failed");
                }
                debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }
}
