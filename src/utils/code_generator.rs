//! Shortcode generation and validation utilities.
//!
//! Generated codes are drawn uniformly from the 62-symbol alphanumeric
//! alphabet. Codes are public identifiers, not secrets, so a thread-local
//! PRNG is sufficient.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet used for generated shortcodes.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated shortcodes (62^6 ≈ 5.68e10 possible codes).
pub const GENERATED_CODE_LEN: usize = 6;

/// Minimum length of a caller-supplied shortcode.
pub const MIN_CUSTOM_CODE_LEN: usize = 4;

static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{4,}$").expect("shortcode regex is valid"));

/// Generates a random 6-character alphanumeric shortcode.
///
/// Uniqueness is not checked here; the registry re-checks under its insert lock.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is a syntactically valid shortcode.
pub fn is_valid_code(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

/// Validates a user-provided custom shortcode.
///
/// # Rules
///
/// - At least 4 characters
/// - ASCII letters and digits only
///
/// # Errors
///
/// Returns [`AppError::InvalidShortcode`] if either rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CUSTOM_CODE_LEN {
        return Err(AppError::invalid_shortcode(
            "Shortcode must be at least 4 characters",
            json!({ "shortcode": code, "provided_length": code.len() }),
        ));
    }

    if !is_valid_code(code) {
        return Err(AppError::invalid_shortcode(
            "Shortcode can only contain letters and digits",
            json!({ "shortcode": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), GENERATED_CODE_LEN);
    }

    #[test]
    fn test_generate_code_alphanumeric() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_mostly_unique() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // 1000 draws from ~5.7e10 codes; a collision here would be astronomically unlikely.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_charset_has_62_symbols() {
        let unique: HashSet<u8> = CHARSET.iter().copied().collect();
        assert_eq!(CHARSET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("abcd").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_and_digits() {
        assert!(validate_custom_code("abc123").is_ok());
        assert!(validate_custom_code("MyLink2024").is_ok());
    }

    #[test]
    fn test_validate_long_code() {
        assert!(validate_custom_code(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let result = validate_custom_code("abc");
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::InvalidShortcode { .. }));
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_hyphen_not_allowed() {
        let result = validate_custom_code("my-link");
        assert!(matches!(result, Err(AppError::InvalidShortcode { .. })));
    }

    #[test]
    fn test_validate_spaces_not_allowed() {
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_non_ascii_not_allowed() {
        assert!(validate_custom_code("ссылка").is_err());
        assert!(validate_custom_code("abcé").is_err());
    }
}
