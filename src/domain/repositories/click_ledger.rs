//! Append-only click log keyed by shortcode.

use crate::domain::entities::Click;

/// Ordered, append-only log of clicks per shortcode.
///
/// The ledger performs no validation of its own. Callers (the registry)
/// guarantee that a shortcode exists before opening or appending to it, and
/// serialize appends per shortcode.
#[cfg_attr(test, mockall::automock)]
pub trait ClickLedger: Send + Sync {
    /// Creates an empty sequence for a freshly registered shortcode.
    fn open(&self, code: &str);

    /// Appends a click at the end of the shortcode's sequence.
    fn append(&self, code: &str, click: Click);

    /// Returns every click for the shortcode in append order.
    fn all_events(&self, code: &str) -> Vec<Click>;
}
