//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`store`] - Key-value store abstraction (Redis and in-memory implementations)

pub mod store;
