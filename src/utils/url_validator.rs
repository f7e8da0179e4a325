//! Validation of original URLs submitted for shortening.
//!
//! URLs are checked, not rewritten: the registry stores the trimmed input
//! exactly as submitted so that redirects land on what the caller asked for.
//! The stored value is sent back verbatim in a `Location` header, so it must
//! consist of visible ASCII only.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL may only contain visible ASCII characters")]
    InvalidCharacters,
}

/// Validates that `input` is an absolute, well-formed HTTP(S) URL.
///
/// Returns the trimmed input on success.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] if no host is present.
/// Returns [`UrlValidationError::InvalidCharacters`] for any byte outside
/// visible ASCII once the input is trimmed.
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if !trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}
