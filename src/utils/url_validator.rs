//! URL syntax validation.

use url::{Host, Url};

use super::url_normalizer::enforce_scheme;

/// Longest destination accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Checks whether `input` looks like a shortenable URL.
///
/// The scheme is optional (`example.com/path` is accepted), but when present it
/// must be `http` or `https`.
///
/// # Rules
///
/// - Non-empty, at most [`MAX_URL_LENGTH`] bytes, no whitespace or control characters
/// - Parses as an absolute URL once `http://` is filled in
/// - Carries no credentials (`user:pass@`)
/// - Host is an IP address, `localhost`, or a dotted domain whose labels are
///   alphanumeric with inner hyphens
///
/// # Examples
///
/// ```ignore
/// assert!(is_url("example.com/path"));
/// assert!(is_url("https://sub.example.co.uk/?q=1"));
/// assert!(!is_url("not-a-valid-url"));
/// assert!(!is_url("javascript:alert(1)"));
/// ```
pub fn is_url(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.is_empty()
        || trimmed.len() > MAX_URL_LENGTH
        || trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
    {
        return false;
    }

    let Ok(url) = Url::parse(&enforce_scheme(trimmed)) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    if !url.username().is_empty() || url.password().is_some() {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => domain == "localhost" || is_dotted_domain(domain),
        None => false,
    }
}

/// `true` for names like `example.com`: two or more labels, and a top-level
/// label that is not purely numeric.
fn is_dotted_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
