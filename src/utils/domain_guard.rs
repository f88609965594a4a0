//! Destination domain blocklist.

use url::Url;

use super::url_normalizer::enforce_scheme;

/// Refuses destinations pointing at blocked hosts.
///
/// The service's own domain is always blocked so short links cannot point at
/// other short links. Matching is case-insensitive, ignores a leading `www.`
/// and the port, and covers subdomains of every blocked entry.
#[derive(Debug, Clone, Default)]
pub struct DomainGuard {
    blocked: Vec<String>,
}

impl DomainGuard {
    /// Builds a guard from the service domain and extra blocked domains.
    ///
    /// Entries may carry a scheme or port (`localhost:3000`, `https://s.example.com`);
    /// only the host is kept. Entries without a usable host are ignored.
    pub fn new<I, S>(service_domain: &str, blocked_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blocked: Vec<String> = std::iter::once(service_domain.to_string())
            .chain(blocked_domains.into_iter().map(|d| d.as_ref().to_string()))
            .filter_map(|entry| host_of(&entry))
            .collect();

        blocked.sort();
        blocked.dedup();

        Self { blocked }
    }

    /// Returns `false` if the URL's host is blocked or cannot be determined.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let guard = DomainGuard::new("s.example.com", ["evil.test"]);
    /// assert!(guard.is_allowed_domain("rust-lang.org"));
    /// assert!(!guard.is_allowed_domain("https://www.s.example.com/abc"));
    /// assert!(!guard.is_allowed_domain("cdn.evil.test/x"));
    /// ```
    pub fn is_allowed_domain(&self, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };

        !self
            .blocked
            .iter()
            .any(|blocked| host == *blocked || host.ends_with(&format!(".{}", blocked)))
    }

    /// Hosts this guard refuses, normalized.
    pub fn blocked(&self) -> &[String] {
        &self.blocked
    }
}

/// Lowercased host of a URL or bare domain, without port or leading `www.`.
fn host_of(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let url = Url::parse(&enforce_scheme(trimmed)).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(host.as_str());

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
