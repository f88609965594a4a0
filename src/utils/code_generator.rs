//! Short code generation and validation utilities.
//!
//! Generated codes are cut from a random UUID v4, so they only contain
//! lowercase hex digits. Custom codes supplied by callers are checked against a
//! small character set and the paths the router already serves.

use crate::error::AppError;
use serde_json::json;
use uuid::Uuid;

/// Maximum length of a generated or custom code (a simple-form UUID is 32 hex digits).
pub const MAX_CODE_LENGTH: usize = 32;

/// Reserved codes that cannot be used as short links.
///
/// These codes collide with routes served by the application itself.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Generates a random short code of `length` characters.
///
/// The code is the prefix of a random UUID v4. Truncation makes collisions
/// possible; callers detect them through the store's set-if-absent write and
/// report them, no retry happens here.
///
/// `length` is clamped to `1..=MAX_CODE_LENGTH`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(length.clamp(1, MAX_CODE_LENGTH));
    code
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("abc123").is_ok());
/// assert!(validate_custom_code("my-link_2024").is_ok());
///
/// assert!(validate_custom_code("").is_err());          // Empty
/// assert!(validate_custom_code("my link").is_err());   // Space
/// assert!(validate_custom_code("health").is_err());    // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            format!("Custom short must be 1-{} characters", MAX_CODE_LENGTH),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom short can only contain letters, digits, hyphens, and underscores",
            json!({ "short": code }),
        ));
    }

    if RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code)) {
        return Err(AppError::bad_request(
            "This short is reserved",
            json!({ "short": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_default_length() {
        assert_eq!(generate_code(6).len(), 6);
    }

    #[test]
    fn test_generate_code_custom_length() {
        assert_eq!(generate_code(10).len(), 10);
    }

    #[test]
    fn test_generate_code_length_is_clamped() {
        assert_eq!(generate_code(0).len(), 1);
        assert_eq!(generate_code(100).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_hex_characters() {
        let code = generate_code(32);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(12)).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_simple_code() {
        assert!(validate_custom_code("abc123").is_ok());
    }

    #[test]
    fn test_validate_single_character() {
        assert!(validate_custom_code("x").is_ok());
    }

    #[test]
    fn test_validate_mixed_valid_chars() {
        assert!(validate_custom_code("My-Link_2024").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn test_validate_too_long() {
        let result = validate_custom_code(&"a".repeat(33));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("1-32 characters"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_spaces_not_allowed() {
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_slash_not_allowed() {
        let result = validate_custom_code("a/b");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("letters, digits"));
    }

    #[test]
    fn test_validate_non_ascii_not_allowed() {
        assert!(validate_custom_code("café").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_validate_reserved_case_insensitive() {
        assert!(validate_custom_code("HEALTH").is_err());
    }
}
