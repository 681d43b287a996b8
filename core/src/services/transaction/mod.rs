//! Unit-of-work coordination

mod coordinator;


pub use coordinator::{TransactionCoordinator, UnitOfWork};
