//! Click entity representing a single served redirect.

use chrono::{DateTime, Utc};

/// A click event recorded when a short link redirects a visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub origin: String,
}

impl Click {
    /// Creates a new Click instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let click = Click::new(
    ///     Utc::now(),
    ///     Some("https://google.com".to_string()),
    ///     "192.168.1.1".to_string(),
    /// );
    /// ```
    pub fn new(clicked_at: DateTime<Utc>, referrer: Option<String>, origin: String) -> Self {
        Self {
            clicked_at,
            referrer,
            origin,
        }
    }
}

/// Request metadata for a redirect, before it is timestamped by the registry.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub referrer: Option<String>,
    pub origin: String,
}

impl NewClick {
    /// Stamps the click with the instant the redirect was served.
    pub fn at(self, clicked_at: DateTime<Utc>) -> Click {
        Click::new(clicked_at, self.referrer, self.origin)
    }
}
