//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::MAX_EXPIRY_HOURS;
use crate::domain::entities::{Link, QuotaStatus};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination to shorten. A missing scheme is filled in with `http://`.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom short code. Empty means "generate one".
    #[serde(default)]
    pub short: Option<String>,

    /// Optional expiry in hours. Missing or zero means the configured default.
    #[serde(default)]
    #[validate(range(max = MAX_EXPIRY_HOURS, message = "expire must be at most 8760 hours"))]
    pub expire: Option<u32>,
}

impl ShortenRequest {
    /// The custom code, if one was actually supplied.
    pub fn custom_short(&self) -> Option<&str> {
        self.short
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Successful shorten result together with the caller's quota standing.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Destination as stored, scheme included.
    pub url: String,
    /// Assigned short code.
    pub short: String,
    /// Full public link for `short`.
    pub short_url: String,
    /// Effective expiry in hours.
    pub expire: u32,
    /// Requests left in the current window.
    pub rate_limit: i64,
    /// Minutes until the window resets.
    pub rate_limit_reset: u64,
}

impl ShortenResponse {
    pub fn new(link: Link, short_url: String, quota: &QuotaStatus) -> Self {
        Self {
            url: link.url,
            short: link.code,
            short_url,
            expire: link.expire_hours,
            rate_limit: quota.remaining,
            rate_limit_reset: quota.reset_minutes(),
        }
    }
}
