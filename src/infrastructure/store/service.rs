//! Key-value store trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command error: {0}")]
    Command(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Non-numeric value {value:?} stored under key {key:?}")]
    Corrupt { key: String, value: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A key-value store with expiring entries.
///
/// Each instance addresses one logical namespace (a Redis database). The quota
/// tracker and the link allocator each own a separate instance.
///
/// Every failure is returned to the caller: an unreachable store must never
/// look like an absent key.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store with bounded calls
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for tests and local runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key` with the given TTL, only if the key is absent.
    ///
    /// Returns `Ok(true)` if the value was written and `Ok(false)` if the key
    /// already held a live value, which is left untouched.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool>;

    /// Atomically decrements the integer under `key` and returns the new value.
    ///
    /// If the key is absent it is first seeded with `seed` and `ttl`. The TTL of
    /// an existing key is never reset or extended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] or [`StoreError::Command`] if the stored
    /// value is not an integer.
    async fn decrement(&self, key: &str, seed: i64, ttl: Duration) -> StoreResult<i64>;

    /// Returns the remaining time-to-live of `key`.
    ///
    /// Returns `Ok(None)` if the key is absent or has no expiry.
    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
