//! Delivery of verification links

pub mod log_dispatcher;

pub use log_dispatcher::LogVerificationDispatcher;
