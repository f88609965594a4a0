//! Core domain entities for quota tracking and link allocation.
//!
//! Entities are plain data structures; the store keeps the actual records and
//! the services in [`crate::application::services`] own the rules.
//!
//! # Entity Types
//!
//! - [`Link`] / [`Reservation`] - A short code mapping and the outcome of reserving one
//! - [`QuotaStatus`] / [`Admission`] - A client's standing within its quota window

pub mod link;
pub mod quota;

pub use link::{Link, Reservation};
pub use quota::{Admission, QuotaStatus, whole_minutes};
