//! Account registration and email verification
//!
//! Registration is one atomic unit of work: duplicate check, password hash,
//! insert, verification-token issue and dispatch either all happen or none do.

mod service;


pub use service::RegistrationWorkflow;
