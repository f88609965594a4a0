//! Per-client request quota backed by expiring counters.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::{Admission, QuotaStatus};
use crate::infrastructure::store::{KeyValueStore, StoreError, StoreResult};

/// Tracks how many shorten requests each client has left in its window.
///
/// Each client owns one counter in the quota namespace. The counter is created
/// with the full quota and the window as TTL on the client's first request,
/// decremented once per successful shorten, and disappears when the window
/// expires, which restores the full quota.
pub struct QuotaTracker {
    store: Arc<dyn KeyValueStore>,
    limit: i64,
    window: Duration,
}

impl QuotaTracker {
    /// Creates a tracker granting `limit` requests per `window`.
    pub fn new(store: Arc<dyn KeyValueStore>, limit: i64, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Decides whether `client` may make another request.
    ///
    /// Opens a new window with the full quota if the client has no record.
    /// Nothing is spent here; see [`Self::charge`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored counter is not an integer and
    /// any other [`StoreError`] the store reports. Callers must treat errors as a
    /// rejection.
    pub async fn admit(&self, client: &str) -> StoreResult<Admission> {
        let raw = match self.store.get(client).await? {
            Some(raw) => raw,
            None => {
                let limit = self.limit.to_string();
                if self
                    .store
                    .set_if_absent(client, &limit, self.window)
                    .await?
                {
                    debug!(client, limit = self.limit, "Opened quota window");
                    return Ok(Admission::Allowed(self.full()));
                }

                // A concurrent request opened the window first.
                match self.store.get(client).await? {
                    Some(raw) => raw,
                    None => return Ok(Admission::Allowed(self.full())),
                }
            }
        };

        let remaining = parse_counter(client, &raw)?;
        let reset_after = self.store.ttl(client).await?.unwrap_or(self.window);

        if remaining <= 0 {
            warn!(
                client,
                reset_after_secs = reset_after.as_secs(),
                "Quota exhausted"
            );
            return Ok(Admission::Rejected { reset_after });
        }

        Ok(Admission::Allowed(QuotaStatus {
            remaining,
            reset_after,
        }))
    }

    /// Spends one request from `client`'s quota.
    ///
    /// Uses the store's atomic decrement, so concurrent charges are never lost,
    /// and leaves the window's TTL untouched. If the window expired after
    /// admission, a fresh one is opened and charged.
    pub async fn charge(&self, client: &str) -> StoreResult<QuotaStatus> {
        let remaining = self
            .store
            .decrement(client, self.limit, self.window)
            .await?;
        let reset_after = self.store.ttl(client).await?.unwrap_or(self.window);

        debug!(client, remaining, "Charged quota");

        Ok(QuotaStatus {
            remaining: remaining.max(0),
            reset_after,
        })
    }

    /// Current standing of `client` without creating or changing anything.
    pub async fn status(&self, client: &str) -> StoreResult<QuotaStatus> {
        match self.store.get(client).await? {
            Some(raw) => Ok(QuotaStatus {
                remaining: parse_counter(client, &raw)?.max(0),
                reset_after: self.store.ttl(client).await?.unwrap_or(self.window),
            }),
            None => Ok(self.full()),
        }
    }

    /// Checks if the quota store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    fn full(&self) -> QuotaStatus {
        QuotaStatus {
            remaining: self.limit,
            reset_after: self.window,
        }
    }
}

fn parse_counter(client: &str, raw: &str) -> StoreResult<i64> {
    raw.trim().parse().map_err(|_| StoreError::Corrupt {
        key: client.to_string(),
        value: raw.to_string(),
    })
}
