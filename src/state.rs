//! Shared application state.

use std::sync::Arc;

use crate::application::services::{LinkAllocator, QuotaTracker};
use crate::config::Config;
use crate::infrastructure::store::KeyValueStore;
use crate::utils::domain_guard::DomainGuard;
use crate::utils::url_normalizer;

/// State injected into every handler.
///
/// Cloning is cheap: services are shared behind `Arc`, and each store holds one
/// long-lived connection reused across requests.
#[derive(Clone)]
pub struct AppState {
    pub quota: Arc<QuotaTracker>,
    pub links: Arc<LinkAllocator>,
    pub domain_guard: Arc<DomainGuard>,
    /// Public domain used to build `short_url` values.
    pub service_domain: String,
    /// Whether the client identity comes from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services from `config` onto the two store namespaces.
    pub fn new(
        config: &Config,
        quota_store: Arc<dyn KeyValueStore>,
        link_store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            quota: Arc::new(QuotaTracker::new(
                quota_store,
                config.api_quota,
                config.quota_window(),
            )),
            links: Arc::new(LinkAllocator::new(
                link_store,
                config.short_code_length,
                config.default_expiry_hours,
            )),
            domain_guard: Arc::new(DomainGuard::new(
                &config.service_domain,
                &config.blocked_domains,
            )),
            service_domain: config.service_domain.clone(),
            behind_proxy: config.behind_proxy,
        }
    }

    /// Public URL for `code`, e.g. `http://localhost:3000/abc123`.
    pub fn short_url(&self, code: &str) -> String {
        url_normalizer::short_url(&self.service_domain, code)
    }
}
