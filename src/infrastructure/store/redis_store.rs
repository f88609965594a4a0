//! Redis-backed store implementation.

use super::service::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, RedisResult, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Redis store for one logical database.
///
/// Holds a single long-lived `ConnectionManager`, cloned per call, so all
/// requests share one multiplexed connection that reconnects on its own.
/// Every call is bounded by `timeout`.
pub struct RedisStore {
    connection: ConnectionManager,
    timeout: Duration,
    namespace: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string including the database (e.g., `"redis://localhost:6379/1"`)
    /// - `timeout` - Upper bound for every store call, including this connect
    /// - `namespace` - Name used in log lines (`"links"`, `"quota"`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the server is
    /// unreachable, and [`StoreError::Timeout`] if connecting takes longer than `timeout`.
    pub async fn connect(redis_url: &str, timeout: Duration, namespace: &str) -> StoreResult<Self> {
        info!("Connecting {} store to Redis", namespace);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(timeout))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            connection: manager,
            timeout,
            namespace: namespace.to_string(),
        };

        let mut conn = store.connection.clone();
        store
            .bounded(async move { conn.ping::<()>().await })
            .await
            .map_err(|e| match e {
                StoreError::Timeout(_) => e,
                other => StoreError::Connection(format!("Redis PING failed: {}", other)),
            })?;

        info!("✓ Connected {} store", namespace);

        Ok(store)
    }

    /// Runs a Redis call under the configured timeout.
    async fn bounded<T, F>(&self, call: F) -> StoreResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify(e)),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

/// Splits Redis failures into transport and command errors.
fn classify(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Command(e.to_string())
    }
}

/// Redis `EX` takes whole seconds; sub-second TTLs round up so a key never
/// gets written without an expiry.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = self.bounded(async move { conn.get(key).await }).await?;

        debug!(
            namespace = %self.namespace,
            key,
            hit = value.is_some(),
            "Store GET"
        );

        Ok(value)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<bool> {
        let mut conn = self.connection.clone();
        let reply: Option<String> = self
            .bounded(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("EX")
                    .arg(ttl_seconds(ttl))
                    .arg("NX")
                    .query_async(&mut conn)
                    .await
            })
            .await?;

        let written = reply.is_some();
        debug!(
            namespace = %self.namespace,
            key,
            written,
            "Store SET NX (TTL: {}s)",
            ttl_seconds(ttl)
        );

        Ok(written)
    }

    async fn decrement(&self, key: &str, seed: i64, ttl: Duration) -> StoreResult<i64> {
        let mut conn = self.connection.clone();
        let (remaining,): (i64,) = self
            .bounded(async move {
                redis::pipe()
                    .atomic()
                    .cmd("SET")
                    .arg(key)
                    .arg(seed)
                    .arg("EX")
                    .arg(ttl_seconds(ttl))
                    .arg("NX")
                    .ignore()
                    .cmd("DECR")
                    .arg(key)
                    .query_async(&mut conn)
                    .await
            })
            .await?;

        debug!(namespace = %self.namespace, key, remaining, "Store DECR");

        Ok(remaining)
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let mut conn = self.connection.clone();
        let seconds: i64 = self.bounded(async move { conn.ttl(key).await }).await?;

        // -2: no such key, -1: key without expiry
        Ok(u64::try_from(seconds).ok().map(Duration::from_secs))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        self.bounded(async move { conn.ping::<()>().await })
            .await
            .is_ok()
    }
}
