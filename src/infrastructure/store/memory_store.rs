//! In-process store implementation for tests and local development.

use super::service::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// A store that keeps entries in a process-local map.
///
/// Expiry follows the tokio clock, so tests running with a paused runtime can
/// move time forward with `tokio::time::advance`. Every operation holds the map
/// lock for its whole duration, which makes each call atomic like its Redis
/// counterpart.
///
/// Not shared between processes: use only for tests and single-instance
/// development runs (`STORE_BACKEND=memory`).
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (process-local, not shared)");
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Command("memory store lock poisoned".to_string()))
    }

    /// Drops every expired entry. Runs on writes so keys that are never read
    /// again do not pile up.
    fn sweep_expired(entries: &mut HashMap<String, Entry>, now: Instant) {
        entries.retain(|_, entry| entry.is_live(now));
    }

    /// Drops the entry for `key` if it has expired.
    fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.lock()?;
        Self::purge_expired(&mut entries, key, Instant::now());

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        Self::sweep_expired(&mut entries, now);

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(now + ttl),
            },
        );

        Ok(true)
    }

    async fn decrement(&self, key: &str, seed: i64, ttl: Duration) -> StoreResult<i64> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        Self::sweep_expired(&mut entries, now);

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: seed.to_string(),
            expires_at: Some(now + ttl),
        });

        let current: i64 = entry.value.parse().map_err(|_| StoreError::Corrupt {
            key: key.to_string(),
            value: entry.value.clone(),
        })?;

        let remaining = current - 1;
        entry.value = remaining.to_string();

        Ok(remaining)
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let mut entries = self.lock()?;
        let now = Instant::now();

        Self::purge_expired(&mut entries, key, now);

        Ok(entries
            .get(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now)))
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }
}
