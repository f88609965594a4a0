//! URL scheme enforcement.
//!
//! Destinations are stored exactly as submitted except that a missing scheme is
//! filled in, so `example.com/path` becomes `http://example.com/path`.

/// Schemes accepted as-is.
const HTTP_PREFIXES: &[&str] = &["http://", "https://"];

/// Returns `true` if `input` already starts with `http://` or `https://` (any case).
pub fn has_http_scheme(input: &str) -> bool {
    HTTP_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Prefixes `http://` unless the input already carries an HTTP(S) scheme.
///
/// Surrounding whitespace is trimmed. No other part of the URL is changed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(enforce_scheme("example.com/path"), "http://example.com/path");
/// assert_eq!(enforce_scheme("https://example.com"), "https://example.com");
/// ```
pub fn enforce_scheme(input: &str) -> String {
    let trimmed = input.trim();

    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Public link for `code` on `service_domain`, e.g. `http://localhost:3000/abc123`.
pub fn short_url(service_domain: &str, code: &str) -> String {
    format!(
        "{}/{}",
        enforce_scheme(service_domain).trim_end_matches('/'),
        code
    )
}
