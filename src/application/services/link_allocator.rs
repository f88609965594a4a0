//! Short code allocation backed by set-if-absent writes.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::link::hours;
use crate::domain::entities::{Link, Reservation};
use crate::infrastructure::store::{KeyValueStore, StoreResult};
use crate::utils::code_generator::generate_code;

/// Service for reserving short codes and resolving them back to destinations.
///
/// The only write path is the store's set-if-absent primitive: checking that a
/// code is free and writing it happen in one atomic step, so two concurrent
/// requests for the same code can never both succeed and a live mapping is
/// never overwritten.
///
/// Destinations are expected to be validated and scheme-normalized already;
/// no URL parsing happens here.
pub struct LinkAllocator {
    store: Arc<dyn KeyValueStore>,
    code_length: usize,
    default_expiry_hours: u32,
}

impl LinkAllocator {
    /// Creates a new link allocator.
    pub fn new(store: Arc<dyn KeyValueStore>, code_length: usize, default_expiry_hours: u32) -> Self {
        Self {
            store,
            code_length,
            default_expiry_hours,
        }
    }

    /// Effective expiry for a requested one: missing or zero means the default.
    pub fn effective_expiry(&self, requested_hours: Option<u32>) -> u32 {
        requested_hours
            .filter(|&h| h > 0)
            .unwrap_or(self.default_expiry_hours)
    }

    /// Reserves `code` (or a generated one) for `destination`.
    ///
    /// # Code Selection
    ///
    /// - A non-empty `code` is used as-is
    /// - Otherwise a random code of the configured length is generated; a
    ///   generated code that happens to be taken is reported as
    ///   [`Reservation::AlreadyInUse`] rather than retried
    ///
    /// # Errors
    ///
    /// Store failures are returned as [`crate::infrastructure::store::StoreError`],
    /// never folded into `AlreadyInUse`.
    pub async fn reserve(
        &self,
        code: Option<&str>,
        destination: &str,
        expire_hours: Option<u32>,
    ) -> StoreResult<Reservation> {
        let code = match code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(custom) => custom.to_string(),
            None => generate_code(self.code_length),
        };

        let link = Link::new(
            code,
            destination.to_string(),
            self.effective_expiry(expire_hours),
        );

        if !self
            .store
            .set_if_absent(&link.code, &link.url, link.ttl())
            .await?
        {
            debug!(code = %link.code, "Short code already in use");
            return Ok(Reservation::AlreadyInUse { code: link.code });
        }

        info!(
            code = %link.code,
            url = %link.url,
            expire_hours = link.expire_hours,
            "Created short link"
        );

        Ok(Reservation::Created(link))
    }

    /// Looks up the destination for `code`.
    ///
    /// Returns `Ok(None)` if the code is unknown or expired. An empty stored
    /// value counts as absent.
    pub async fn resolve(&self, code: &str) -> StoreResult<Option<String>> {
        Ok(self
            .store
            .get(code)
            .await?
            .filter(|url| !url.is_empty()))
    }

    /// Remaining lifetime of `code`, in whole hours rounded down.
    pub async fn remaining_hours(&self, code: &str) -> StoreResult<Option<u64>> {
        Ok(self
            .store
            .ttl(code)
            .await?
            .map(|ttl| ttl.as_secs() / hours(1).as_secs()))
    }

    /// Checks if the link store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::{MemoryStore, MockKeyValueStore, StoreError};
    use std::time::Duration;

    fn memory_allocator() -> LinkAllocator {
        LinkAllocator::new(Arc::new(MemoryStore::new()), 6, 24)
    }

    #[test]
    fn test_effective_expiry() {
        let allocator = memory_allocator();

        assert_eq!(allocator.effective_expiry(None), 24);
        assert_eq!(allocator.effective_expiry(Some(0)), 24);
        assert_eq!(allocator.effective_expiry(Some(2)), 2);
    }

    #[tokio::test]
    async fn test_reserve_generates_code_of_configured_length() {
        let allocator = memory_allocator();

        let reservation = allocator
            .reserve(None, "http://example.com/path", None)
            .await
            .unwrap();

        let Reservation::Created(link) = reservation else {
            panic!("expected a created link");
        };
        assert_eq!(link.code.len(), 6);
        assert_eq!(link.expire_hours, 24);
        assert_eq!(
            allocator.resolve(&link.code).await.unwrap().as_deref(),
            Some("http://example.com/path")
        );
    }

    #[tokio::test]
    async fn test_reserve_empty_code_generates() {
        let allocator = memory_allocator();

        let reservation = allocator
            .reserve(Some("  "), "http://example.com", None)
            .await
            .unwrap();

        assert!(matches!(reservation, Reservation::Created(link) if link.code.len() == 6));
    }

    #[tokio::test]
    async fn test_reserve_custom_code() {
        let allocator = memory_allocator();

        let reservation = allocator
            .reserve(Some("abc123"), "http://example.com", Some(2))
            .await
            .unwrap();

        assert_eq!(
            reservation,
            Reservation::Created(Link::new(
                "abc123".to_string(),
                "http://example.com".to_string(),
                2
            ))
        );
    }

    #[tokio::test]
    async fn test_reserve_taken_code_never_overwrites() {
        let allocator = memory_allocator();
        allocator
            .reserve(Some("abc123"), "http://first.com", None)
            .await
            .unwrap();

        let reservation = allocator
            .reserve(Some("abc123"), "http://second.com", None)
            .await
            .unwrap();

        assert_eq!(
            reservation,
            Reservation::AlreadyInUse {
                code: "abc123".to_string()
            }
        );
        assert_eq!(
            allocator.resolve("abc123").await.unwrap().as_deref(),
            Some("http://first.com")
        );
    }

    #[tokio::test]
    async fn test_concurrent_reservations_single_winner() {
        let allocator = Arc::new(memory_allocator());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let allocator = allocator.clone();
                tokio::spawn(async move {
                    allocator
                        .reserve(Some("abc123"), &format!("http://site{}.com", i), None)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = 0;
        let mut in_use = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Reservation::Created(_) => created += 1,
                Reservation::AlreadyInUse { .. } => in_use += 1,
            }
        }

        assert_eq!(created, 1);
        assert_eq!(in_use, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_expires_after_ttl() {
        let allocator = memory_allocator();
        allocator
            .reserve(Some("abc123"), "http://example.com", Some(1))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(allocator.resolve("abc123").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(allocator.resolve("abc123").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_hours() {
        let allocator = memory_allocator();
        allocator
            .reserve(Some("abc123"), "http://example.com", Some(3))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(allocator.remaining_hours("abc123").await.unwrap(), Some(2));
        assert_eq!(allocator.remaining_hours("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reserve_uses_set_if_absent_with_ttl() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_if_absent()
            .withf(|key, value, ttl| {
                key == "promo"
                    && value == "https://example.com"
                    && *ttl == Duration::from_secs(48 * 3600)
            })
            .times(1)
            .returning(|_, _, _| Ok(true));
        store.expect_get().times(0);

        let allocator = LinkAllocator::new(Arc::new(store), 6, 24);
        let reservation = allocator
            .reserve(Some("promo"), "https://example.com", Some(48))
            .await
            .unwrap();

        assert!(matches!(reservation, Reservation::Created(_)));
    }

    #[tokio::test]
    async fn test_reserve_store_failure_is_distinct() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set_if_absent()
            .returning(|_, _, _| Err(StoreError::Connection("refused".to_string())));

        let allocator = LinkAllocator::new(Arc::new(store), 6, 24);
        let result = allocator
            .reserve(Some("abc123"), "http://example.com", None)
            .await;

        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[tokio::test]
    async fn test_resolve_treats_empty_value_as_absent() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(String::new())));

        let allocator = LinkAllocator::new(Arc::new(store), 6, 24);

        assert_eq!(allocator.resolve("abc123").await.unwrap(), None);
    }
}
