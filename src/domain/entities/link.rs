//! Link entity representing a short code mapped to a destination URL.

use std::time::Duration;

/// A reserved short code and the destination it points to.
///
/// Lives in the store until `expire_hours` elapse; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub url: String,
    pub expire_hours: u32,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: String, url: String, expire_hours: u32) -> Self {
        Self {
            code,
            url,
            expire_hours,
        }
    }

    /// Store TTL matching the link's expiry.
    pub fn ttl(&self) -> Duration {
        hours(self.expire_hours)
    }
}

/// Outcome of a code reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    /// The code was free and now maps to the destination.
    Created(Link),

    /// The code already maps to a live destination, which was left untouched.
    AlreadyInUse { code: String },
}

/// Converts whole hours to a duration.
pub fn hours(hours: u32) -> Duration {
    Duration::from_secs(u64::from(hours) * 3600)
}
