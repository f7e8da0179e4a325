//! Link entity representing a shortcode registry record.

use chrono::{DateTime, Duration, Utc};
use validator::Validate;

/// Longest original URL accepted, in bytes.
pub const MAX_URL_LENGTH: u64 = 2048;

/// A shortened URL record.
///
/// Everything except `clicks` is fixed at creation. `clicks` only grows, and
/// only through a successful redirect recorded by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: u64,
}

impl Link {
    /// Creates a new Link instance with a zero click count.
    pub fn new(
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            long_url,
            created_at,
            expires_at,
            clicks: 0,
        }
    }

    /// Builds a link that expires `validity` after `created_at`.
    ///
    /// Returns `None` if the expiry is not representable.
    pub fn with_validity(
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        validity: Duration,
    ) -> Option<Self> {
        let expires_at = created_at.checked_add_signed(validity)?;
        Some(Self::new(code, long_url, created_at, expires_at))
    }

    /// Returns true if the link stopped serving redirects before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

}

/// Input data for creating a new link.
///
/// `code` is `None` when the registry should generate one, and
/// `validity_minutes` is `None` when the configured default applies.
/// Format rules for the URL and shortcode are applied by the link service.
#[derive(Debug, Clone, Validate)]
pub struct NewLink {
    #[validate(length(max = MAX_URL_LENGTH))]
    pub long_url: String,
    pub code: Option<String>,
    pub validity_minutes: Option<i64>,
}
