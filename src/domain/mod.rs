//! Domain layer containing business entities.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Storage contracts live in [`crate::infrastructure::store`]; business rules live in
//! [`crate::application::services`].
//!
//! # Records
//!
//! Both record kinds live entirely in the key-value store; the service keeps no
//! state between requests:
//!
//! 1. **Quota record** - client IP → remaining requests, expiring with the quota window
//! 2. **Link record** - short code → destination URL, expiring with the link

pub mod entities;
