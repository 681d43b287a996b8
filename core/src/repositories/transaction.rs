//! Transaction manager trait for atomic units of work.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Opens and settles transactions on a backing store
///
/// `Tx` is the typed unit-of-work handle. Whoever holds it owns the open
/// transaction; repository calls borrow it explicitly. Implementations must
/// roll the transaction back when a handle is dropped without `commit` or
/// `rollback`, which is what makes panics and cancelled futures safe.
///
/// Transactions run at READ COMMITTED isolation.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    type Tx: Send + 'static;

    /// Start a new transaction
    async fn begin(&self) -> Result<Self::Tx, DomainError>;

    /// Make every write made through `tx` durable
    ///
    /// A unique-key violation surfacing at commit is a `Conflict`; any other
    /// failure is `Internal`.
    async fn commit(&self, tx: Self::Tx) -> Result<(), DomainError>;

    /// Discard every write made through `tx`
    async fn rollback(&self, tx: Self::Tx) -> Result<(), DomainError>;

    /// Backing store reachability, used by health checks
    async fn ping(&self) -> Result<(), DomainError>;
}
