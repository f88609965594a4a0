//! Application layer services implementing business logic.
//!
//! Services own the rules of the shorten flow and talk to storage only through
//! [`crate::infrastructure::store::KeyValueStore`]. HTTP handlers call them in a
//! fixed order: admit, validate, reserve, charge.
//!
//! # Available Services
//!
//! - [`services::quota_tracker::QuotaTracker`] - Per-client request quota
//! - [`services::link_allocator::LinkAllocator`] - Short code reservation and lookup

pub mod services;
