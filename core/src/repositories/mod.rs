pub mod transaction;
pub mod user;

pub use transaction::TransactionManager;
pub use user::{MockTx, MockUserRepository, UserRepository};
